//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Snowflake IDs arrive as strings and are parsed by the services.

use recipe_core::entities::Difficulty;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "First name must be 1-64 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 64, message = "Last name must be 1-64 characters"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "First name must be 1-64 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Last name must be 1-64 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(url(message = "Profile image must be a URL"))]
    pub profile_image: Option<String>,
}

// ============================================================================
// Recipe Requests
// ============================================================================

/// Create recipe request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Minutes
    #[validate(range(min = 1, max = 10080, message = "Preparation time must be 1-10080 minutes"))]
    pub preparation_time: Option<i32>,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[validate(length(min = 1, max = 100, message = "A recipe needs 1-100 ingredients"))]
    pub ingredients: Vec<String>,

    #[validate(length(min = 1, max = 100, message = "A recipe needs 1-100 steps"))]
    pub steps: Vec<String>,

    #[validate(url(message = "Recipe image must be a URL"))]
    pub recipe_image: Option<String>,
}

/// Partial recipe update. The rating statistics are not updatable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 10080, message = "Preparation time must be 1-10080 minutes"))]
    pub preparation_time: Option<i32>,

    pub difficulty: Option<Difficulty>,

    #[validate(length(min = 1, max = 100, message = "A recipe needs 1-100 ingredients"))]
    pub ingredients: Option<Vec<String>>,

    #[validate(length(min = 1, max = 100, message = "A recipe needs 1-100 steps"))]
    pub steps: Option<Vec<String>>,

    #[validate(url(message = "Recipe image must be a URL"))]
    pub recipe_image: Option<String>,
}

/// Query string of the recipe listing
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListRecipesQuery {
    /// Comma separated, every one must be present
    pub ingredients: Option<String>,

    #[validate(range(min = 0.0, max = 5.0, message = "min_rating must be between 0 and 5"))]
    pub min_rating: Option<f64>,

    #[validate(range(min = 1, message = "max_time must be positive"))]
    pub max_time: Option<i32>,

    /// 1-based
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<i64>,

    pub limit: Option<i64>,

    /// updated_at, created_at, average_rating, number_of_ratings, preparation_time or title
    pub sort: Option<String>,

    /// asc or desc
    pub order: Option<String>,
}

// ============================================================================
// Rating Requests
// ============================================================================

/// Rate a recipe
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRatingRequest {
    pub recipe_id: String,

    /// Score 1-5
    pub rating: i32,
}

/// Change a rating. Omitting `rating` only touches `updated_at`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRatingRequest {
    pub rating: Option<i32>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub recipe_id: String,

    /// Set to reply to another comment of the same recipe
    pub parent_comment_id: Option<String>,

    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,
}

/// Update comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,
}
