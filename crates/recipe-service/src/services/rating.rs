//! Rating service
//!
//! Records ratings and keeps each recipe's `average_rating` and
//! `number_of_ratings` in step with its rating set. Statistics are never
//! recomputed on read: every create, update and delete folds one
//! [`RatingChange`] into the recipe through
//! [`RecipeRepository::apply_rating_change`](recipe_core::traits::RecipeRepository::apply_rating_change),
//! which is atomic per recipe.
//!
//! Ordering keeps the two stores from drifting apart when one write fails:
//!
//! - create: insert the rating, then apply `Added`. A failed apply deletes the rating again.
//! - update: swap the score if it still holds the value read, then apply `Replaced`.
//!   A failed apply restores the old score.
//! - delete: apply `Removed`, then delete the rating. A failed delete applies `Added` back.
//!
//! This service does not authorize. Callers check rating ownership.

use recipe_core::entities::{Rating, Recipe};
use recipe_core::{DomainError, RatingChange, Score, Snowflake};
use tracing::{debug, error, info, instrument, warn};

use crate::dto::{CreateRatingRequest, RatingResponse, ReconcileResponse, UpdateRatingRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::parse_id;

/// Averages closer than this count as equal when checking for drift
const DRIFT_TOLERANCE: f64 = 1e-9;

/// Reads-then-swaps tried before an update reports a conflict
const MAX_SWAP_ATTEMPTS: u32 = 8;

/// Rating service
pub struct RatingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RatingService<'a> {
    /// Create a new RatingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Rate a recipe from a request body
    pub async fn create_rating(
        &self,
        user_id: Snowflake,
        request: CreateRatingRequest,
    ) -> ServiceResult<RatingResponse> {
        let recipe_id = parse_id("recipe_id", &request.recipe_id)?;
        self.create(recipe_id, user_id, request.rating).await
    }

    /// Record `user_id`'s first rating of a recipe
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        recipe_id: Snowflake,
        user_id: Snowflake,
        score: i32,
    ) -> ServiceResult<RatingResponse> {
        let score = Score::new(score)?;
        self.require_recipe(recipe_id).await?;

        let rating = Rating::new(self.ctx.generate_id(), user_id, recipe_id, score);
        self.ctx.rating_repo().create(&rating).await?;

        if let Err(err) = self
            .ctx
            .recipe_repo()
            .apply_rating_change(recipe_id, RatingChange::Added(score))
            .await
        {
            if let Err(undo) = self.ctx.rating_repo().delete(rating.id).await {
                error!(rating_id = %rating.id, error = %undo, "Failed to remove rating after statistics update failed");
            }
            return Err(report(recipe_id, err));
        }

        info!(rating_id = %rating.id, recipe_id = %recipe_id, score = score.value(), "Rating created");

        Ok(RatingResponse::from(rating))
    }

    /// Change a rating's score.
    ///
    /// Without a score, or with the score already stored, only `updated_at`
    /// moves and the recipe statistics are left alone.
    ///
    /// The score is swapped only if it still holds the value read, so the
    /// `Replaced` change folded into the recipe always matches what was
    /// overwritten. A swap lost to a concurrent writer starts over from a
    /// fresh read.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        rating_id: Snowflake,
        request: UpdateRatingRequest,
    ) -> ServiceResult<RatingResponse> {
        for attempt in 1..=MAX_SWAP_ATTEMPTS {
            let mut rating = self.get_rating_entity(rating_id).await?;
            let requested = request.rating.map(Score::new).transpose()?;

            let new_score = match requested {
                Some(score) if score != rating.score => score,
                _ => {
                    rating.touch();
                    if self.ctx.rating_repo().replace_score(&rating, rating.score).await? {
                        return Ok(RatingResponse::from(rating));
                    }
                    debug!(rating_id = %rating_id, attempt, "Rating changed under touch, retrying");
                    continue;
                }
            };

            self.require_recipe(rating.recipe_id).await?;

            let old_score = rating.rescore(new_score);
            if !self.ctx.rating_repo().replace_score(&rating, old_score).await? {
                debug!(rating_id = %rating_id, attempt, "Rating changed while rescoring, retrying");
                continue;
            }

            let change = RatingChange::Replaced {
                old: old_score,
                new: new_score,
            };
            if let Err(err) = self
                .ctx
                .recipe_repo()
                .apply_rating_change(rating.recipe_id, change)
                .await
            {
                self.restore_score(&mut rating, old_score).await;
                return Err(report(rating.recipe_id, err));
            }

            info!(
                rating_id = %rating.id,
                recipe_id = %rating.recipe_id,
                old = old_score.value(),
                new = new_score.value(),
                "Rating updated"
            );

            return Ok(RatingResponse::from(rating));
        }

        warn!(rating_id = %rating_id, "Rating kept changing underneath the update");
        Err(ServiceError::conflict("Rating was changed by another request, try again"))
    }

    /// Put back the score a failed statistics update left unaccounted for
    async fn restore_score(&self, rating: &mut Rating, old_score: Score) {
        let new_score = rating.rescore(old_score);
        match self.ctx.rating_repo().replace_score(rating, new_score).await {
            Ok(true) => {}
            Ok(false) => {
                error!(rating_id = %rating.id, "Rating changed before its score could be restored");
            }
            Err(undo) => {
                error!(rating_id = %rating.id, error = %undo, "Failed to restore rating after statistics update failed");
            }
        }
    }

    /// Remove a rating and take it out of the recipe statistics
    #[instrument(skip(self))]
    pub async fn delete(&self, rating_id: Snowflake) -> ServiceResult<()> {
        let rating = self.get_rating_entity(rating_id).await?;
        self.require_recipe(rating.recipe_id).await?;

        self.ctx
            .recipe_repo()
            .apply_rating_change(rating.recipe_id, RatingChange::Removed(rating.score))
            .await
            .map_err(|err| report(rating.recipe_id, err))?;

        if let Err(err) = self.ctx.rating_repo().delete(rating.id).await {
            if let Err(undo) = self
                .ctx
                .recipe_repo()
                .apply_rating_change(rating.recipe_id, RatingChange::Added(rating.score))
                .await
            {
                error!(rating_id = %rating.id, error = %undo, "Failed to restore statistics after rating delete failed");
            }
            return Err(err.into());
        }

        info!(rating_id = %rating.id, recipe_id = %rating.recipe_id, "Rating deleted");

        Ok(())
    }

    /// The rating `user_id` gave a recipe
    #[instrument(skip(self))]
    pub async fn get_rating(
        &self,
        recipe_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<RatingResponse> {
        self.ctx
            .rating_repo()
            .find_by_recipe_and_user(recipe_id, user_id)
            .await?
            .map(RatingResponse::from)
            .ok_or(ServiceError::Domain(DomainError::UserRatingNotFound {
                recipe_id,
                user_id,
            }))
    }

    /// Look a rating up by ID
    #[instrument(skip(self))]
    pub async fn find_rating(&self, rating_id: Snowflake) -> ServiceResult<RatingResponse> {
        self.get_rating_entity(rating_id)
            .await
            .map(RatingResponse::from)
    }

    /// Get rating entity by ID
    #[instrument(skip(self))]
    pub async fn get_rating_entity(&self, rating_id: Snowflake) -> ServiceResult<Rating> {
        self.ctx
            .rating_repo()
            .find_by_id(rating_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::RatingNotFound(rating_id)))
    }

    /// All ratings of a recipe, oldest first
    #[instrument(skip(self))]
    pub async fn list_recipe_ratings(
        &self,
        recipe_id: Snowflake,
    ) -> ServiceResult<Vec<RatingResponse>> {
        self.require_recipe(recipe_id).await?;

        let ratings = self.ctx.rating_repo().find_by_recipe(recipe_id).await?;
        Ok(ratings.iter().map(RatingResponse::from).collect())
    }

    /// Recompute a recipe's statistics from its stored ratings and overwrite
    /// the denormalized values.
    ///
    /// Repair path only. Concurrent rating writes during the recompute can
    /// still race with it.
    #[instrument(skip(self))]
    pub async fn reconcile_stats(&self, recipe_id: Snowflake) -> ServiceResult<ReconcileResponse> {
        let recipe = self.require_recipe(recipe_id).await?;
        let previous = recipe.rating_stats();

        let current = self.ctx.rating_repo().summarize(recipe_id).await?;
        let updated = self
            .ctx
            .recipe_repo()
            .set_rating_stats(recipe_id, current)
            .await?;

        let drifted = previous.count != current.count
            || (previous.average - current.average).abs() > DRIFT_TOLERANCE;
        if drifted {
            warn!(
                recipe_id = %recipe_id,
                stored_average = previous.average,
                stored_count = previous.count,
                actual_average = current.average,
                actual_count = current.count,
                "Rating statistics were out of sync and have been repaired"
            );
        } else {
            info!(recipe_id = %recipe_id, "Rating statistics verified");
        }

        Ok(ReconcileResponse {
            recipe_id: recipe_id.to_string(),
            previous,
            current: updated.rating_stats(),
            drifted,
        })
    }

    async fn require_recipe(&self, recipe_id: Snowflake) -> ServiceResult<Recipe> {
        self.ctx
            .recipe_repo()
            .find_by_id(recipe_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::RecipeNotFound(recipe_id)))
    }
}

/// Log consistency faults loudly before handing the error back
fn report(recipe_id: Snowflake, err: DomainError) -> ServiceError {
    if matches!(err, DomainError::DataConsistencyFault(_)) {
        error!(recipe_id = %recipe_id, error = %err, "Recipe rating statistics are inconsistent");
    }
    ServiceError::Domain(err)
}
