//! Integration test utilities for the recipe backend
//!
//! In-memory repositories, a test server bound to an ephemeral port, and
//! request/response fixtures for end-to-end tests against the REST API.

pub mod fixtures;
pub mod memory;

pub use fixtures::*;
pub use helpers::*;
pub use memory::{Faults, MemoryStore};
