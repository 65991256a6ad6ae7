//! Recipe service
//!
//! Recipe CRUD and the filtered listing. The rating statistics are read-only
//! here; only the rating service changes them.

use recipe_core::entities::Recipe;
use recipe_core::traits::{RecipeQuery, RecipeSort, SortOrder};
use recipe_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CreateRecipeRequest, ListRecipesQuery, PaginatedResponse, RecipeResponse, UpdateRecipeRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Default page size of recipe listings
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Largest page size a client may ask for
pub const MAX_PAGE_SIZE: i64 = 100;

/// Recipe service
pub struct RecipeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RecipeService<'a> {
    /// Create a new RecipeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a new, unrated recipe
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_recipe(
        &self,
        user_id: Snowflake,
        request: CreateRecipeRequest,
    ) -> ServiceResult<RecipeResponse> {
        let ingredients = clean_list("ingredients", request.ingredients)?;
        let steps = clean_list("steps", request.steps)?;

        let mut recipe = Recipe::new(
            self.ctx.generate_id(),
            user_id,
            request.title.trim().to_string(),
            request.difficulty,
            ingredients,
            steps,
        );
        recipe.description = request.description;
        recipe.preparation_time = request.preparation_time;
        recipe.recipe_image = request.recipe_image;

        self.ctx.recipe_repo().create(&recipe).await?;

        info!(recipe_id = %recipe.id, user_id = %user_id, "Recipe created");

        Ok(RecipeResponse::from(recipe))
    }

    /// Get a recipe by ID
    #[instrument(skip(self))]
    pub async fn get_recipe(&self, recipe_id: Snowflake) -> ServiceResult<RecipeResponse> {
        self.get_recipe_entity(recipe_id)
            .await
            .map(RecipeResponse::from)
    }

    /// Get recipe entity by ID
    #[instrument(skip(self))]
    pub async fn get_recipe_entity(&self, recipe_id: Snowflake) -> ServiceResult<Recipe> {
        self.ctx
            .recipe_repo()
            .find_by_id(recipe_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::RecipeNotFound(recipe_id)))
    }

    /// Filtered, sorted, paginated listing
    #[instrument(skip(self))]
    pub async fn list_recipes(
        &self,
        query: ListRecipesQuery,
    ) -> ServiceResult<PaginatedResponse<RecipeResponse>> {
        let (query, page) = build_query(query)?;
        let recipes = self.ctx.recipe_repo().search(&query).await?;

        Ok(PaginatedResponse::new(
            recipes.into_iter().map(RecipeResponse::from).collect(),
            page,
            query.limit,
        ))
    }

    /// All recipes of one author, newest first
    #[instrument(skip(self))]
    pub async fn list_user_recipes(&self, user_id: Snowflake) -> ServiceResult<Vec<RecipeResponse>> {
        let recipes = self.ctx.recipe_repo().find_by_user(user_id).await?;
        Ok(recipes.into_iter().map(RecipeResponse::from).collect())
    }

    /// Partial update of the descriptive fields, author only
    #[instrument(skip(self, request))]
    pub async fn update_recipe(
        &self,
        recipe_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateRecipeRequest,
    ) -> ServiceResult<RecipeResponse> {
        let mut recipe = self.get_recipe_entity(recipe_id).await?;
        if !recipe.is_owned_by(actor_id) {
            return Err(DomainError::NotRecipeOwner.into());
        }

        let mut changed = false;

        if let Some(title) = request.title {
            recipe.title = title.trim().to_string();
            changed = true;
        }
        if let Some(description) = request.description {
            recipe.description = Some(description);
            changed = true;
        }
        if let Some(preparation_time) = request.preparation_time {
            recipe.preparation_time = Some(preparation_time);
            changed = true;
        }
        if let Some(difficulty) = request.difficulty {
            recipe.difficulty = difficulty;
            changed = true;
        }
        if let Some(ingredients) = request.ingredients {
            recipe.ingredients = clean_list("ingredients", ingredients)?;
            changed = true;
        }
        if let Some(steps) = request.steps {
            recipe.steps = clean_list("steps", steps)?;
            changed = true;
        }
        if let Some(recipe_image) = request.recipe_image {
            recipe.recipe_image = Some(recipe_image);
            changed = true;
        }

        if !changed {
            return Ok(RecipeResponse::from(recipe));
        }

        self.ctx.recipe_repo().update(&recipe).await?;
        info!(recipe_id = %recipe_id, "Recipe updated");

        // re-read so the response carries the stored statistics and timestamp
        self.get_recipe(recipe_id).await
    }

    /// Delete a recipe with its ratings and comments, author only
    #[instrument(skip(self))]
    pub async fn delete_recipe(&self, recipe_id: Snowflake, actor_id: Snowflake) -> ServiceResult<()> {
        let recipe = self.get_recipe_entity(recipe_id).await?;
        if !recipe.is_owned_by(actor_id) {
            return Err(DomainError::NotRecipeOwner.into());
        }

        self.ctx.recipe_repo().delete(recipe_id).await?;
        info!(recipe_id = %recipe_id, "Recipe deleted");

        Ok(())
    }
}

/// Trim entries and drop blank ones; an emptied list is a validation error
fn clean_list(field: &str, items: Vec<String>) -> ServiceResult<Vec<String>> {
    let cleaned: Vec<String> = items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();

    if cleaned.is_empty() {
        return Err(ServiceError::validation(format!("{field} must not be empty")));
    }
    Ok(cleaned)
}

fn parse_sort(raw: Option<&str>) -> ServiceResult<RecipeSort> {
    let Some(raw) = raw else {
        return Ok(RecipeSort::default());
    };
    match raw {
        "updated_at" => Ok(RecipeSort::UpdatedAt),
        "created_at" => Ok(RecipeSort::CreatedAt),
        "average_rating" => Ok(RecipeSort::AverageRating),
        "number_of_ratings" => Ok(RecipeSort::NumberOfRatings),
        "preparation_time" => Ok(RecipeSort::PreparationTime),
        "title" => Ok(RecipeSort::Title),
        other => Err(ServiceError::validation(format!("cannot sort by '{other}'"))),
    }
}

fn parse_order(raw: Option<&str>) -> ServiceResult<SortOrder> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None => Ok(SortOrder::default()),
        Some("asc") => Ok(SortOrder::Asc),
        Some("desc") => Ok(SortOrder::Desc),
        Some(other) => Err(ServiceError::validation(format!(
            "order must be asc or desc, got '{other}'"
        ))),
    }
}

/// Turn the listing query string into a repository query and the page number
fn build_query(raw: ListRecipesQuery) -> ServiceResult<(RecipeQuery, i64)> {
    let page = raw.page.unwrap_or(1).max(1);
    let limit = raw
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let ingredients = raw
        .ingredients
        .as_deref()
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|i| !i.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();

    let query = RecipeQuery {
        ingredients,
        min_rating: raw.min_rating,
        max_time: raw.max_time,
        author_id: None,
        sort: parse_sort(raw.sort.as_deref())?,
        order: parse_order(raw.order.as_deref())?,
        limit,
        offset: (page - 1).saturating_mul(limit),
    };

    Ok((query, page))
}
