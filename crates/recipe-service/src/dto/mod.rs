//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, CreateRatingRequest, CreateRecipeRequest, ListRecipesQuery,
    LoginRequest, RefreshTokenRequest, RegisterRequest, UpdateCommentRequest,
    UpdateRatingRequest, UpdateRecipeRequest, UpdateUserRequest,
};

pub use responses::{
    AuthResponse, CommentResponse, CurrentUserResponse, HealthChecks, HealthResponse,
    PaginatedResponse, PaginationMeta, ProbeStatus, RatingResponse, ReadinessResponse,
    RecipeResponse, ReconcileResponse, UserResponse,
};
