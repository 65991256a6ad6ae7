//! Rating entity <-> model mapper

use recipe_core::entities::Rating;
use recipe_core::error::DomainError;
use recipe_core::value_objects::{RatingStats, Score, Snowflake};

use crate::models::{RatingModel, RatingSummaryModel};

/// Convert RatingModel to Rating entity, rejecting out-of-range scores
impl TryFrom<RatingModel> for Rating {
    type Error = DomainError;

    fn try_from(model: RatingModel) -> Result<Self, Self::Error> {
        let score = Score::new(i32::from(model.score)).map_err(|_| {
            DomainError::DataConsistencyFault(format!(
                "rating {} has stored score {}",
                model.id, model.score
            ))
        })?;

        Ok(Rating {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            recipe_id: Snowflake::new(model.recipe_id),
            score,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<RatingSummaryModel> for RatingStats {
    fn from(model: RatingSummaryModel) -> Self {
        match model.average {
            Some(average) if model.count > 0 => RatingStats::new(average, model.count),
            _ => RatingStats::EMPTY,
        }
    }
}

/// Score as stored in the SMALLINT column
pub fn score_to_db(score: Score) -> i16 {
    i16::from(score.value())
}
