//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod rating;
mod recipe;
mod user;

pub use comment::CommentModel;
pub use rating::{RatingModel, RatingSummaryModel};
pub use recipe::{RatingStatsModel, RecipeModel};
pub use user::UserModel;
