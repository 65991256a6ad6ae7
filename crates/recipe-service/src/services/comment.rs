//! Comment service
//!
//! Top-level comments on recipes and one level of threaded replies.

use recipe_core::entities::Comment;
use recipe_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::parse_id;

/// Trimmed comment text, rejected when blank or longer than
/// [`Comment::MAX_LENGTH`] characters
fn clean_content(raw: &str) -> ServiceResult<String> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(ServiceError::validation("Comment must not be blank"));
    }
    if content.chars().count() > Comment::MAX_LENGTH {
        return Err(ServiceError::validation(format!(
            "Comment must be at most {} characters",
            Comment::MAX_LENGTH
        )));
    }
    Ok(content.to_owned())
}

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a recipe, or reply to a comment of that recipe
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        user_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let recipe_id = parse_id("recipe_id", &request.recipe_id)?;
        let content = clean_content(&request.content)?;

        if self.ctx.recipe_repo().find_by_id(recipe_id).await?.is_none() {
            return Err(DomainError::RecipeNotFound(recipe_id).into());
        }

        let comment = match request.parent_comment_id.as_deref() {
            None => Comment::new(self.ctx.generate_id(), user_id, recipe_id, content),
            Some(raw) => {
                let parent = self
                    .get_comment_entity(parse_id("parent_comment_id", raw)?)
                    .await?;
                if parent.recipe_id != recipe_id {
                    return Err(ServiceError::validation(
                        "Parent comment belongs to a different recipe",
                    ));
                }
                Comment::new_reply(self.ctx.generate_id(), user_id, &parent, content)
            }
        };

        self.ctx.comment_repo().create(&comment).await?;
        if let Some(parent_id) = comment.parent_comment_id {
            self.ctx.comment_repo().mark_has_children(parent_id).await?;
        }

        info!(comment_id = %comment.id, recipe_id = %recipe_id, "Comment created");

        Ok(CommentResponse::from(comment))
    }

    /// Get a comment by ID
    #[instrument(skip(self))]
    pub async fn get_comment(&self, comment_id: Snowflake) -> ServiceResult<CommentResponse> {
        self.get_comment_entity(comment_id)
            .await
            .map(CommentResponse::from)
    }

    /// Top-level comments of a recipe, oldest first
    #[instrument(skip(self))]
    pub async fn list_recipe_comments(
        &self,
        recipe_id: Snowflake,
    ) -> ServiceResult<Vec<CommentResponse>> {
        if self.ctx.recipe_repo().find_by_id(recipe_id).await?.is_none() {
            return Err(DomainError::RecipeNotFound(recipe_id).into());
        }

        let comments = self.ctx.comment_repo().find_top_level(recipe_id).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    /// Replies to a comment, oldest first
    #[instrument(skip(self))]
    pub async fn list_replies(&self, comment_id: Snowflake) -> ServiceResult<Vec<CommentResponse>> {
        let comment = self.get_comment_entity(comment_id).await?;

        let replies = self.ctx.comment_repo().find_replies(comment.id).await?;
        if replies.is_empty() {
            return Err(DomainError::NoReplies(comment_id).into());
        }

        Ok(replies.into_iter().map(CommentResponse::from).collect())
    }

    /// Edit a comment, author only
    #[instrument(skip(self, request))]
    pub async fn update_comment(
        &self,
        comment_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let mut comment = self.get_comment_entity(comment_id).await?;
        if !comment.is_authored_by(actor_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        let content = clean_content(&request.content)?;

        comment.edit(content);
        self.ctx.comment_repo().update(&comment).await?;
        info!(comment_id = %comment_id, "Comment updated");

        Ok(CommentResponse::from(comment))
    }

    /// Delete a comment and its replies, author only
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        comment_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<()> {
        let comment = self.get_comment_entity(comment_id).await?;
        if !comment.is_authored_by(actor_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        self.ctx.comment_repo().delete(comment_id).await?;
        info!(comment_id = %comment_id, "Comment deleted");

        Ok(())
    }

    async fn get_comment_entity(&self, comment_id: Snowflake) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::CommentNotFound(comment_id)))
    }
}
