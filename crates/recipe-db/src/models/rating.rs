//! Rating database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for ratings table
#[derive(Debug, Clone, FromRow)]
pub struct RatingModel {
    pub id: i64,
    pub user_id: i64,
    pub recipe_id: i64,
    pub score: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `AVG`/`COUNT` over a recipe's ratings
#[derive(Debug, Clone, Copy, FromRow)]
pub struct RatingSummaryModel {
    pub average: Option<f64>,
    pub count: i64,
}
