//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod rating;
pub mod recipe;
pub mod user;

pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use rating::RatingService;
pub use recipe::{RecipeService, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use user::UserService;

use recipe_core::Snowflake;

/// Parse a Snowflake ID sent as a string in a request body
pub fn parse_id(field: &str, raw: &str) -> ServiceResult<Snowflake> {
    Snowflake::parse(raw.trim())
        .map_err(|_| ServiceError::validation(format!("{field} is not a valid ID")))
}
