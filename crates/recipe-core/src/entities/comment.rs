//! Comment entity - a top-level comment on a recipe or a reply to one

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub recipe_id: Snowflake,
    pub parent_comment_id: Option<Snowflake>,
    pub content: String,
    pub has_children: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Maximum comment length in characters
    pub const MAX_LENGTH: usize = 2000;

    /// Create a top-level comment
    pub fn new(id: Snowflake, user_id: Snowflake, recipe_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            recipe_id,
            parent_comment_id: None,
            content,
            has_children: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a reply to `parent`
    pub fn new_reply(id: Snowflake, user_id: Snowflake, parent: &Comment, content: String) -> Self {
        let mut reply = Self::new(id, user_id, parent.recipe_id, content);
        reply.parent_comment_id = Some(parent.id);
        reply
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_comment_id.is_some()
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}
