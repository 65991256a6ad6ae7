//! PostgreSQL implementation of RecipeRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use recipe_core::entities::Recipe;
use recipe_core::error::DomainError;
use recipe_core::traits::{RecipeQuery, RecipeRepository, RecipeSort, RepoResult, SortOrder};
use recipe_core::value_objects::{RatingChange, RatingStats, Snowflake};

use crate::models::{RatingStatsModel, RecipeModel};

use super::error::{map_db_error, map_write_error, recipe_not_found, user_not_found};

const RECIPE_COLUMNS: &str = "id, user_id, title, description, preparation_time, difficulty, \
     ingredients, steps, recipe_image, average_rating, number_of_ratings, created_at, updated_at";

fn sort_column(sort: RecipeSort) -> &'static str {
    match sort {
        RecipeSort::UpdatedAt => "updated_at",
        RecipeSort::CreatedAt => "created_at",
        RecipeSort::AverageRating => "average_rating",
        RecipeSort::NumberOfRatings => "number_of_ratings",
        RecipeSort::PreparationTime => "preparation_time",
        RecipeSort::Title => "title",
    }
}

fn sort_direction(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

/// PostgreSQL implementation of RecipeRepository
#[derive(Clone)]
pub struct PgRecipeRepository {
    pool: PgPool,
}

impl PgRecipeRepository {
    /// Create a new PgRecipeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the listing query for `query`
    fn search_builder(query: &RecipeQuery) -> QueryBuilder<'_, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE TRUE"));

        if !query.ingredients.is_empty() {
            let wanted: Vec<String> = query
                .ingredients
                .iter()
                .map(|i| i.trim().to_lowercase())
                .collect();
            qb.push(" AND ARRAY(SELECT LOWER(i) FROM UNNEST(ingredients) AS i) @> ")
                .push_bind(wanted);
        }
        if let Some(min_rating) = query.min_rating {
            qb.push(" AND average_rating >= ").push_bind(min_rating);
        }
        if let Some(max_time) = query.max_time {
            qb.push(" AND preparation_time <= ").push_bind(max_time);
        }
        if let Some(author_id) = query.author_id {
            qb.push(" AND user_id = ").push_bind(author_id.into_inner());
        }

        qb.push(format!(
            " ORDER BY {} {} NULLS LAST, id {}",
            sort_column(query.sort),
            sort_direction(query.order),
            sort_direction(query.order),
        ));
        qb.push(" LIMIT ").push_bind(query.limit);
        qb.push(" OFFSET ").push_bind(query.offset);

        qb
    }
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Recipe>> {
        let result = sqlx::query_as::<_, RecipeModel>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Recipe::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Recipe>> {
        let results = sqlx::query_as::<_, RecipeModel>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Recipe::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &RecipeQuery) -> RepoResult<Vec<Recipe>> {
        let mut qb = Self::search_builder(query);
        let results = qb
            .build_query_as::<RecipeModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Recipe::from).collect())
    }

    #[instrument(skip(self, recipe), fields(recipe_id = %recipe.id))]
    async fn create(&self, recipe: &Recipe) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO recipes (id, user_id, title, description, preparation_time, difficulty,
                                 ingredients, steps, recipe_image, average_rating,
                                 number_of_ratings, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(recipe.id.into_inner())
        .bind(recipe.user_id.into_inner())
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(recipe.preparation_time)
        .bind(recipe.difficulty.as_str())
        .bind(&recipe.ingredients)
        .bind(&recipe.steps)
        .bind(&recipe.recipe_image)
        .bind(recipe.average_rating)
        .bind(recipe.number_of_ratings)
        .bind(recipe.created_at)
        .bind(recipe.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                || DomainError::RecipeAlreadyExists,
                || user_not_found(recipe.user_id),
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self, recipe), fields(recipe_id = %recipe.id))]
    async fn update(&self, recipe: &Recipe) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE recipes
            SET title = $2, description = $3, preparation_time = $4, difficulty = $5,
                ingredients = $6, steps = $7, recipe_image = $8, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(recipe.id.into_inner())
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(recipe.preparation_time)
        .bind(recipe.difficulty.as_str())
        .bind(&recipe.ingredients)
        .bind(&recipe.steps)
        .bind(&recipe.recipe_image)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                || DomainError::RecipeAlreadyExists,
                || recipe_not_found(recipe.id),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(recipe_not_found(recipe.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // ratings and comments go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(recipe_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn apply_rating_change(
        &self,
        recipe_id: Snowflake,
        change: RatingChange,
    ) -> RepoResult<Recipe> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock serializes concurrent changes to the same recipe
        let current = sqlx::query_as::<_, RatingStatsModel>(
            r"
            SELECT average_rating, number_of_ratings
            FROM recipes
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(recipe_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| recipe_not_found(recipe_id))?;

        let current = RatingStats::from(current);
        let next = current.apply(change)?;

        let updated = sqlx::query_as::<_, RecipeModel>(&format!(
            r"
            UPDATE recipes
            SET average_rating = $2, number_of_ratings = $3
            WHERE id = $1
            RETURNING {RECIPE_COLUMNS}
            "
        ))
        .bind(recipe_id.into_inner())
        .bind(next.average)
        .bind(next.count)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(
            recipe_id = %recipe_id,
            ?change,
            from_average = current.average,
            from_count = current.count,
            to_average = next.average,
            to_count = next.count,
            "Rating statistics updated"
        );

        Ok(Recipe::from(updated))
    }

    #[instrument(skip(self))]
    async fn set_rating_stats(
        &self,
        recipe_id: Snowflake,
        stats: RatingStats,
    ) -> RepoResult<Recipe> {
        let updated = sqlx::query_as::<_, RecipeModel>(&format!(
            r"
            UPDATE recipes
            SET average_rating = $2, number_of_ratings = $3
            WHERE id = $1
            RETURNING {RECIPE_COLUMNS}
            "
        ))
        .bind(recipe_id.into_inner())
        .bind(stats.average)
        .bind(stats.count)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| recipe_not_found(recipe_id))?;

        Ok(Recipe::from(updated))
    }
}
