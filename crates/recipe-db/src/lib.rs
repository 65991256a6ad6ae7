//! # recipe-db
//!
//! Database layer implementing the `recipe-core` repository traits with PostgreSQL via SQLx.
//!
//! - Connection pool management and runtime-loaded migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations, including the row-locked rating statistics update
//!
//! ```rust,ignore
//! use recipe_db::{create_pool, run_migrations, DatabaseConfig, PgRecipeRepository};
//!
//! let config = DatabaseConfig::default();
//! let pool = create_pool(&config).await?;
//! run_migrations(&pool, &config.migrations_dir).await?;
//! let recipes = PgRecipeRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool, DEFAULT_MIGRATIONS_DIR};
pub use repositories::{
    PgCommentRepository, PgHealthProbe, PgRatingRepository, PgRecipeRepository, PgUserRepository,
};
