//! Rating handlers
//!
//! The rating service does not authorize, so ownership of a rating (and of
//! the recipe for a statistics repair) is checked here.

use axum::{extract::State, Json};
use recipe_core::{DomainError, Snowflake};
use recipe_service::dto::{
    CreateRatingRequest, RatingResponse, ReconcileResponse, UpdateRatingRequest,
};

use recipe_service::RatingService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

async fn ensure_rating_owner(
    service: &RatingService<'_>,
    rating_id: Snowflake,
    user_id: Snowflake,
) -> ApiResult<()> {
    let rating = service.get_rating_entity(rating_id).await?;
    if !rating.is_owned_by(user_id) {
        return Err(DomainError::NotRatingOwner.into());
    }
    Ok(())
}

/// Rate a recipe
///
/// POST /ratings
pub async fn create_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateRatingRequest>,
) -> ApiResult<Created<Json<RatingResponse>>> {
    let rating = state.ratings().create_rating(auth.user_id, request).await?;
    Ok(Created(Json(rating)))
}

/// Get a rating by ID
///
/// GET /ratings/{rating_id}
pub async fn get_rating(
    State(state): State<AppState>,
    IdPath(rating_id): IdPath,
) -> ApiResult<Json<RatingResponse>> {
    let rating = state.ratings().find_rating(rating_id).await?;
    Ok(Json(rating))
}

/// Change the score of one's own rating
///
/// PATCH /ratings/{rating_id}
pub async fn update_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(rating_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateRatingRequest>,
) -> ApiResult<Json<RatingResponse>> {
    let service = state.ratings();
    ensure_rating_owner(&service, rating_id, auth.user_id).await?;

    let rating = service.update(rating_id, request).await?;
    Ok(Json(rating))
}

/// Delete one's own rating
///
/// DELETE /ratings/{rating_id}
pub async fn delete_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(rating_id): IdPath,
) -> ApiResult<NoContent> {
    let service = state.ratings();
    ensure_rating_owner(&service, rating_id, auth.user_id).await?;

    service.delete(rating_id).await?;
    Ok(NoContent)
}

/// All ratings of a recipe
///
/// GET /recipes/{recipe_id}/ratings
pub async fn get_recipe_ratings(
    State(state): State<AppState>,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Json<Vec<RatingResponse>>> {
    let ratings = state.ratings().list_recipe_ratings(recipe_id).await?;
    Ok(Json(ratings))
}

/// The current user's rating of a recipe
///
/// GET /recipes/{recipe_id}/ratings/@me
pub async fn get_my_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Json<RatingResponse>> {
    let rating = state.ratings().get_rating(recipe_id, auth.user_id).await?;
    Ok(Json(rating))
}

/// Recompute a recipe's statistics from its ratings (recipe author only)
///
/// POST /recipes/{recipe_id}/ratings/reconcile
pub async fn reconcile_recipe_ratings(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Json<ReconcileResponse>> {
    let recipe = state.recipes().get_recipe_entity(recipe_id).await?;
    if !recipe.is_owned_by(auth.user_id) {
        return Err(DomainError::NotRecipeOwner.into());
    }

    let outcome = state.ratings().reconcile_stats(recipe_id).await?;
    Ok(Json(outcome))
}
