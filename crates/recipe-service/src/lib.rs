//! # recipe-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CommentService, RatingService, RecipeService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
