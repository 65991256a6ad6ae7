//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and path IDs.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::IdPath;
pub use validated::{ValidatedJson, ValidatedQuery};
