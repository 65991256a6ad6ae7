//! PostgreSQL implementation of RatingRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use recipe_core::entities::Rating;
use recipe_core::error::DomainError;
use recipe_core::traits::{RatingRepository, RepoResult};
use recipe_core::value_objects::{RatingStats, Score, Snowflake};

use crate::mappers::score_to_db;
use crate::models::{RatingModel, RatingSummaryModel};

use super::error::{map_db_error, map_write_error, rating_not_found, recipe_not_found};

/// PostgreSQL implementation of RatingRepository
#[derive(Clone)]
pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    /// Create a new PgRatingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Rating>> {
        let result = sqlx::query_as::<_, RatingModel>(
            r"
            SELECT id, user_id, recipe_id, score, created_at, updated_at
            FROM ratings
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Rating::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_recipe_and_user(
        &self,
        recipe_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Rating>> {
        let result = sqlx::query_as::<_, RatingModel>(
            r"
            SELECT id, user_id, recipe_id, score, created_at, updated_at
            FROM ratings
            WHERE recipe_id = $1 AND user_id = $2
            ",
        )
        .bind(recipe_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Rating::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_recipe(&self, recipe_id: Snowflake) -> RepoResult<Vec<Rating>> {
        let results = sqlx::query_as::<_, RatingModel>(
            r"
            SELECT id, user_id, recipe_id, score, created_at, updated_at
            FROM ratings
            WHERE recipe_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(recipe_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Rating::try_from).collect()
    }

    #[instrument(skip(self, rating), fields(rating_id = %rating.id, recipe_id = %rating.recipe_id))]
    async fn create(&self, rating: &Rating) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO ratings (id, user_id, recipe_id, score, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(rating.id.into_inner())
        .bind(rating.user_id.into_inner())
        .bind(rating.recipe_id.into_inner())
        .bind(score_to_db(rating.score))
        .bind(rating.created_at)
        .bind(rating.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                || DomainError::RatingAlreadyExists,
                || recipe_not_found(rating.recipe_id),
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self, rating), fields(rating_id = %rating.id))]
    async fn replace_score(&self, rating: &Rating, expected: Score) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE ratings
            SET score = $2, updated_at = $3
            WHERE id = $1 AND score = $4
            ",
        )
        .bind(rating.id.into_inner())
        .bind(score_to_db(rating.score))
        .bind(rating.updated_at)
        .bind(score_to_db(expected))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(rating_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn summarize(&self, recipe_id: Snowflake) -> RepoResult<RatingStats> {
        let summary = sqlx::query_as::<_, RatingSummaryModel>(
            r"
            SELECT AVG(score)::DOUBLE PRECISION AS average, COUNT(*) AS count
            FROM ratings
            WHERE recipe_id = $1
            ",
        )
        .bind(recipe_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(RatingStats::from(summary))
    }
}
