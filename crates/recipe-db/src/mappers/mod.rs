//! Entity to model mappers
//!
//! Conversions from database rows (`models`) to domain entities (`recipe-core`).

mod comment;
mod rating;
mod recipe;
mod user;

pub use rating::score_to_db;
