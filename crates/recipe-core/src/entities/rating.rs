//! Rating entity - one user's score for one recipe

use chrono::{DateTime, Utc};

use crate::value_objects::{Score, Snowflake};

/// Rating entity. At most one exists per `(user_id, recipe_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub recipe_id: Snowflake,
    pub score: Score,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(id: Snowflake, user_id: Snowflake, recipe_id: Snowflake, score: Score) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            recipe_id,
            score,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    /// Change the score, returning the previous one
    pub fn rescore(&mut self, score: Score) -> Score {
        let old = std::mem::replace(&mut self.score, score);
        self.updated_at = Utc::now();
        old
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
