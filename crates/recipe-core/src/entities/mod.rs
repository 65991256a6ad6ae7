//! Domain entities - core business objects

mod comment;
mod rating;
mod recipe;
mod user;

pub use comment::Comment;
pub use rating::Rating;
pub use recipe::{Difficulty, Recipe};
pub use user::User;
