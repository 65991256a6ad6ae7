//! Comment entity <-> model mapper

use recipe_core::entities::Comment;
use recipe_core::value_objects::Snowflake;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            recipe_id: Snowflake::new(model.recipe_id),
            parent_comment_id: model.parent_comment_id.map(Snowflake::new),
            content: model.content,
            has_children: model.has_children,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
