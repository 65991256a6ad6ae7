//! Recipe entity - a user's recipe plus its denormalized rating statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{RatingStats, Snowflake};

/// Recipe difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(DomainError::ValidationError(format!(
                "unknown difficulty '{other}'"
            ))),
        }
    }
}

/// Recipe entity
///
/// `average_rating` and `number_of_ratings` are derived from the recipe's
/// ratings. They are only ever written through
/// [`RecipeRepository::apply_rating_change`](crate::traits::RecipeRepository::apply_rating_change)
/// (or the stats repair path), never by a descriptive update.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    /// Minutes
    pub preparation_time: Option<i32>,
    pub difficulty: Difficulty,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub recipe_image: Option<String>,
    pub average_rating: f64,
    pub number_of_ratings: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a new, unrated Recipe
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        title: String,
        difficulty: Difficulty,
        ingredients: Vec<String>,
        steps: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            title,
            description: None,
            preparation_time: None,
            difficulty,
            ingredients,
            steps,
            recipe_image: None,
            average_rating: 0.0,
            number_of_ratings: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    pub fn rating_stats(&self) -> RatingStats {
        RatingStats::new(self.average_rating, self.number_of_ratings)
    }

    pub fn set_rating_stats(&mut self, stats: RatingStats) {
        self.average_rating = stats.average;
        self.number_of_ratings = stats.count;
    }

    /// True when every ingredient in `wanted` appears in the recipe (case-insensitive)
    pub fn has_all_ingredients(&self, wanted: &[String]) -> bool {
        wanted.iter().all(|w| {
            self.ingredients
                .iter()
                .any(|i| i.eq_ignore_ascii_case(w.trim()))
        })
    }
}
