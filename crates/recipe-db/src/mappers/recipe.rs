//! Recipe entity <-> model mapper

use recipe_core::entities::{Difficulty, Recipe};
use recipe_core::value_objects::{RatingStats, Snowflake};

use crate::models::{RatingStatsModel, RecipeModel};

/// Convert RecipeModel to Recipe entity
///
/// The `difficulty` column is CHECK-constrained; an unknown value falls back to
/// the default difficulty.
impl From<RecipeModel> for Recipe {
    fn from(model: RecipeModel) -> Self {
        Recipe {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            title: model.title,
            description: model.description,
            preparation_time: model.preparation_time,
            difficulty: model.difficulty.parse::<Difficulty>().unwrap_or_default(),
            ingredients: model.ingredients,
            steps: model.steps,
            recipe_image: model.recipe_image,
            average_rating: model.average_rating,
            number_of_ratings: model.number_of_ratings,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<RatingStatsModel> for RatingStats {
    fn from(model: RatingStatsModel) -> Self {
        RatingStats::new(model.average_rating, model.number_of_ratings)
    }
}
