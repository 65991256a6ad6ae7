//! Comment handlers

use axum::{extract::State, Json};
use recipe_service::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Comment on a recipe or reply to a comment
///
/// POST /comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let comment = state.comments().create_comment(auth.user_id, request).await?;
    Ok(Created(Json(comment)))
}

/// GET /comments/{comment_id}
pub async fn get_comment(
    State(state): State<AppState>,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<CommentResponse>> {
    let comment = state.comments().get_comment(comment_id).await?;
    Ok(Json(comment))
}

/// PATCH /comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let comment = state
        .comments()
        .update_comment(comment_id, auth.user_id, request)
        .await?;
    Ok(Json(comment))
}

/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<NoContent> {
    state.comments().delete_comment(comment_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Top-level comments of a recipe
///
/// GET /recipes/{recipe_id}/comments
pub async fn get_recipe_comments(
    State(state): State<AppState>,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = state.comments().list_recipe_comments(recipe_id).await?;
    Ok(Json(comments))
}

/// Replies to a comment
///
/// GET /comments/{comment_id}/replies
pub async fn get_replies(
    State(state): State<AppState>,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let replies = state.comments().list_replies(comment_id).await?;
    Ok(Json(replies))
}
