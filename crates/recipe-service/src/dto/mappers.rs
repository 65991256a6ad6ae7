//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use recipe_core::entities::{Comment, Rating, Recipe, User};

use super::responses::{
    CommentResponse, CurrentUserResponse, RatingResponse, RecipeResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            profile_image: user.profile_image.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            profile: UserResponse::from(user),
            email: user.email.clone(),
            updated_at: user.updated_at,
        }
    }
}

// ============================================================================
// Recipe Mappers
// ============================================================================

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.to_string(),
            user_id: recipe.user_id.to_string(),
            title: recipe.title,
            description: recipe.description,
            preparation_time: recipe.preparation_time,
            difficulty: recipe.difficulty,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            recipe_image: recipe.recipe_image,
            average_rating: recipe.average_rating,
            number_of_ratings: recipe.number_of_ratings,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

// ============================================================================
// Rating Mappers
// ============================================================================

impl From<&Rating> for RatingResponse {
    fn from(rating: &Rating) -> Self {
        Self {
            id: rating.id.to_string(),
            user_id: rating.user_id.to_string(),
            recipe_id: rating.recipe_id.to_string(),
            rating: rating.score.value(),
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self::from(&rating)
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            user_id: comment.user_id.to_string(),
            recipe_id: comment.recipe_id.to_string(),
            parent_comment_id: comment.parent_comment_id.map(|id| id.to_string()),
            content: comment.content,
            has_children: comment.has_children,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
