//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, comments, health, ratings, recipes, users};
use crate::state::AppState;

/// Prefix every route is mounted under
pub const API_PREFIX: &str = "/api/v1";

/// API v1 routes, without health checks
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(recipe_routes())
        .merge(rating_routes())
        .merge(comment_routes())
}

/// Health check routes (kept apart so they bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_current_user)
                .patch(users::update_current_user)
                .delete(users::delete_current_user),
        )
        .route("/users/@me/recipes", get(users::get_current_user_recipes))
        .route("/users/:user_id", get(users::get_user))
}

/// Recipe routes, including the per-recipe rating and comment listings
fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(recipes::list_recipes).post(recipes::create_recipe))
        .route(
            "/recipes/:recipe_id",
            get(recipes::get_recipe)
                .patch(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/recipes/:recipe_id/ratings", get(ratings::get_recipe_ratings))
        .route("/recipes/:recipe_id/ratings/@me", get(ratings::get_my_rating))
        .route(
            "/recipes/:recipe_id/ratings/reconcile",
            post(ratings::reconcile_recipe_ratings),
        )
        .route("/recipes/:recipe_id/comments", get(comments::get_recipe_comments))
}

/// Rating routes
fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/ratings", post(ratings::create_rating))
        .route(
            "/ratings/:rating_id",
            get(ratings::get_rating)
                .patch(ratings::update_rating)
                .delete(ratings::delete_rating),
        )
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(comments::create_comment))
        .route(
            "/comments/:comment_id",
            get(comments::get_comment)
                .patch(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/comments/:comment_id/replies", get(comments::get_replies))
}
