//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in recipe-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod error;
mod health;
mod rating;
mod recipe;
mod user;

pub use comment::PgCommentRepository;
pub use health::PgHealthProbe;
pub use rating::PgRatingRepository;
pub use recipe::PgRecipeRepository;
pub use user::PgUserRepository;
