//! Recipe handlers

use axum::{extract::State, Json};
use recipe_service::dto::{
    CreateRecipeRequest, ListRecipesQuery, PaginatedResponse, RecipeResponse, UpdateRecipeRequest,
};

use crate::extractors::{AuthUser, IdPath, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List recipes
///
/// GET /recipes?ingredients=egg,flour&min_rating=4&max_time=30&page=1&limit=10&sort=average_rating&order=desc
pub async fn list_recipes(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListRecipesQuery>,
) -> ApiResult<Json<PaginatedResponse<RecipeResponse>>> {
    let page = state.recipes().list_recipes(query).await?;
    Ok(Json(page))
}

/// Create a recipe
///
/// POST /recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateRecipeRequest>,
) -> ApiResult<Created<Json<RecipeResponse>>> {
    let recipe = state.recipes().create_recipe(auth.user_id, request).await?;
    Ok(Created(Json(recipe)))
}

/// Get a recipe with its rating statistics
///
/// GET /recipes/{recipe_id}
pub async fn get_recipe(
    State(state): State<AppState>,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Json<RecipeResponse>> {
    let recipe = state.recipes().get_recipe(recipe_id).await?;
    Ok(Json(recipe))
}

/// Update a recipe
///
/// PATCH /recipes/{recipe_id}
pub async fn update_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateRecipeRequest>,
) -> ApiResult<Json<RecipeResponse>> {
    let recipe = state.recipes().update_recipe(recipe_id, auth.user_id, request).await?;
    Ok(Json(recipe))
}

/// Delete a recipe
///
/// DELETE /recipes/{recipe_id}
pub async fn delete_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<NoContent> {
    state.recipes().delete_recipe(recipe_id, auth.user_id).await?;
    Ok(NoContent)
}
