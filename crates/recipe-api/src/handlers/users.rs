//! User handlers
//!
//! Endpoints for user profiles and the current user's recipes.

use axum::{extract::State, Json};
use recipe_service::dto::{CurrentUserResponse, RecipeResponse, UpdateUserRequest, UserResponse};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let response = state.users().get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Update current user
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let response = state.users().update_user(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete current user
///
/// DELETE /users/@me
pub async fn delete_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    state.users().delete_user(auth.user_id).await?;
    Ok(NoContent)
}

/// Recipes authored by the current user
///
/// GET /users/@me/recipes
pub async fn get_current_user_recipes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<RecipeResponse>>> {
    let recipes = state.recipes().list_user_recipes(auth.user_id).await?;
    Ok(Json(recipes))
}

/// Get user by ID (public profile)
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let response = state.users().get_user(user_id).await?;
    Ok(Json(response))
}
