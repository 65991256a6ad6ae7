//! # recipe-core
//!
//! Domain layer containing entities, value objects, rating statistics, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Comment, Difficulty, Rating, Recipe, User};
pub use error::DomainError;
pub use traits::{
    CommentRepository, HealthProbe, RatingRepository, RecipeQuery, RecipeRepository, RecipeSort,
    RepoResult, SortOrder, UserRepository,
};
pub use value_objects::{
    RatingChange, RatingStats, Score, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
