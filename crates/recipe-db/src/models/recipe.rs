//! Recipe database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for recipes table
#[derive(Debug, Clone, FromRow)]
pub struct RecipeModel {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub preparation_time: Option<i32>,
    pub difficulty: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub recipe_image: Option<String>,
    pub average_rating: f64,
    pub number_of_ratings: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Just the derived statistics, locked for update
#[derive(Debug, Clone, Copy, FromRow)]
pub struct RatingStatsModel {
    pub average_rating: f64,
    pub number_of_ratings: i64,
}
