//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(Snowflake),

    #[error("Rating not found: {0}")]
    RatingNotFound(Snowflake),

    #[error("User {user_id} has not rated recipe {recipe_id}")]
    UserRatingNotFound {
        recipe_id: Snowflake,
        user_id: Snowflake,
    },

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Comment {0} has no replies")]
    NoReplies(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Rating must be an integer between 1 and 5, got {0}")]
    InvalidScore(i32),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not recipe owner")]
    NotRecipeOwner,

    #[error("Not rating owner")]
    NotRatingOwner,

    #[error("Not comment author")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Recipe already exists")]
    RecipeAlreadyExists,

    #[error("User has already rated this recipe")]
    RatingAlreadyExists,

    #[error("Comment already exists")]
    CommentAlreadyExists,

    // =========================================================================
    // Aggregate Consistency
    // =========================================================================
    #[error("Rating statistics out of sync: {0}")]
    DataConsistencyFault(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RecipeNotFound(_) => "UNKNOWN_RECIPE",
            Self::RatingNotFound(_) | Self::UserRatingNotFound { .. } => "UNKNOWN_RATING",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::NoReplies(_) => "NO_REPLIES",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidScore(_) => "INVALID_RATING",
            Self::WeakPassword(_) => "WEAK_PASSWORD",

            // Authorization
            Self::NotRecipeOwner => "NOT_RECIPE_OWNER",
            Self::NotRatingOwner => "NOT_RATING_OWNER",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::RecipeAlreadyExists => "RECIPE_ALREADY_EXISTS",
            Self::RatingAlreadyExists => "RATING_ALREADY_EXISTS",
            Self::CommentAlreadyExists => "COMMENT_ALREADY_EXISTS",

            Self::DataConsistencyFault(_) => "DATA_CONSISTENCY_FAULT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::RecipeNotFound(_)
                | Self::RatingNotFound(_)
                | Self::UserRatingNotFound { .. }
                | Self::CommentNotFound(_)
                | Self::NoReplies(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidScore(_) | Self::WeakPassword(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotRecipeOwner | Self::NotRatingOwner | Self::NotCommentAuthor
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::RecipeAlreadyExists
                | Self::RatingAlreadyExists
                | Self::CommentAlreadyExists
        )
    }
}
