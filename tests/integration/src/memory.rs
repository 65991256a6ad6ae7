//! In-memory repository implementations
//!
//! Behave like the PostgreSQL repositories (soft-deleted users, cascading
//! deletes, unique ratings per user and recipe) without a database. Each
//! table sits behind its own `parking_lot` mutex; `apply_rating_change` holds
//! the recipe lock for the whole read-compute-write, which gives it the same
//! per-recipe atomicity as the row lock in PostgreSQL.
//!
//! [`Faults`] switches make individual writes fail so compensation paths in
//! the services can be exercised.

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use recipe_core::entities::{Comment, Rating, Recipe, User};
use recipe_core::traits::{
    CommentRepository, HealthProbe, RatingRepository, RecipeQuery, RecipeRepository, RecipeSort,
    RepoResult, SortOrder, UserRepository,
};
use recipe_core::{DomainError, RatingChange, RatingStats, Score, Snowflake};

/// Failure switches for individual repository writes
#[derive(Debug, Default)]
pub struct Faults {
    /// `apply_rating_change` fails with a database error
    pub stats_update: AtomicBool,
    /// `RatingRepository::delete` fails with a database error
    pub rating_delete: AtomicBool,
    /// `HealthProbe::ping` fails
    pub database_down: AtomicBool,
}

impl Faults {
    pub fn set(flag: &AtomicBool, on: bool) {
        flag.store(on, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool, what: &str) -> RepoResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(format!("injected failure: {what}")));
        }
        Ok(())
    }
}

struct StoredUser {
    user: User,
    password_hash: String,
    deleted: bool,
}

/// Shared tables behind the in-memory repositories
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Snowflake, StoredUser>>,
    recipes: Mutex<HashMap<Snowflake, Recipe>>,
    ratings: Mutex<HashMap<Snowflake, Rating>>,
    comments: Mutex<HashMap<Snowflake, Comment>>,
    pub faults: Faults,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Stored recipe, bypassing the services
    pub fn recipe(&self, id: Snowflake) -> Option<Recipe> {
        self.recipes.lock().get(&id).cloned()
    }

    /// Stored rating, bypassing the services
    pub fn rating(&self, id: Snowflake) -> Option<Rating> {
        self.ratings.lock().get(&id).cloned()
    }

    pub fn rating_count(&self, recipe_id: Snowflake) -> usize {
        self.ratings
            .lock()
            .values()
            .filter(|r| r.recipe_id == recipe_id)
            .count()
    }

    /// Insert a recipe directly
    pub fn insert_recipe(&self, recipe: Recipe) {
        self.recipes.lock().insert(recipe.id, recipe);
    }

    /// Insert a rating directly, skipping the recipe check that `create` makes
    pub fn insert_rating(&self, rating: Rating) {
        self.ratings.lock().insert(rating.id, rating);
    }

    /// Overwrite stored statistics without touching the ratings, simulating drift
    pub fn corrupt_stats(&self, recipe_id: Snowflake, stats: RatingStats) {
        if let Some(recipe) = self.recipes.lock().get_mut(&recipe_id) {
            recipe.set_rating_stats(stats);
        }
    }

    pub fn users(self: &Arc<Self>) -> Arc<MemoryUserRepository> {
        Arc::new(MemoryUserRepository(Arc::clone(self)))
    }

    pub fn recipes(self: &Arc<Self>) -> Arc<MemoryRecipeRepository> {
        Arc::new(MemoryRecipeRepository(Arc::clone(self)))
    }

    pub fn ratings(self: &Arc<Self>) -> Arc<MemoryRatingRepository> {
        Arc::new(MemoryRatingRepository(Arc::clone(self)))
    }

    pub fn comments(self: &Arc<Self>) -> Arc<MemoryCommentRepository> {
        Arc::new(MemoryCommentRepository(Arc::clone(self)))
    }

    pub fn health(self: &Arc<Self>) -> Arc<MemoryHealthProbe> {
        Arc::new(MemoryHealthProbe(Arc::clone(self)))
    }
}

// ============================================================================
// Users
// ============================================================================

pub struct MemoryUserRepository(Arc<MemoryStore>);

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self
            .0
            .users
            .lock()
            .get(&id)
            .filter(|s| !s.deleted)
            .map(|s| s.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .0
            .users
            .lock()
            .values()
            .find(|s| !s.deleted && s.user.email.eq_ignore_ascii_case(email))
            .map(|s| s.user.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut users = self.0.users.lock();
        if users
            .values()
            .any(|s| !s.deleted && s.user.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash: password_hash.to_string(),
                deleted: false,
            },
        );
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        match self.0.users.lock().get_mut(&user.id) {
            Some(stored) if !stored.deleted => {
                stored.user = user.clone();
                Ok(())
            }
            _ => Err(DomainError::UserNotFound(user.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        match self.0.users.lock().get_mut(&id) {
            Some(stored) if !stored.deleted => {
                stored.deleted = true;
                Ok(())
            }
            _ => Err(DomainError::UserNotFound(id)),
        }
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self
            .0
            .users
            .lock()
            .get(&id)
            .filter(|s| !s.deleted)
            .map(|s| s.password_hash.clone()))
    }
}

// ============================================================================
// Recipes
// ============================================================================

pub struct MemoryRecipeRepository(Arc<MemoryStore>);

fn compare_recipes(a: &Recipe, b: &Recipe, sort: RecipeSort) -> CmpOrdering {
    let primary = match sort {
        RecipeSort::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        RecipeSort::CreatedAt => a.created_at.cmp(&b.created_at),
        RecipeSort::AverageRating => a.average_rating.total_cmp(&b.average_rating),
        RecipeSort::NumberOfRatings => a.number_of_ratings.cmp(&b.number_of_ratings),
        RecipeSort::PreparationTime => a.preparation_time.cmp(&b.preparation_time),
        RecipeSort::Title => a.title.cmp(&b.title),
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Recipe>> {
        Ok(self.0.recipe(id))
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self
            .0
            .recipes
            .lock()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| compare_recipes(b, a, RecipeSort::CreatedAt));
        Ok(recipes)
    }

    async fn search(&self, query: &RecipeQuery) -> RepoResult<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self
            .0
            .recipes
            .lock()
            .values()
            .filter(|r| r.has_all_ingredients(&query.ingredients))
            .filter(|r| query.min_rating.map_or(true, |min| r.average_rating >= min))
            .filter(|r| {
                query
                    .max_time
                    .map_or(true, |max| r.preparation_time.is_some_and(|t| t <= max))
            })
            .filter(|r| query.author_id.map_or(true, |author| r.user_id == author))
            .cloned()
            .collect();

        recipes.sort_by(|a, b| match query.order {
            SortOrder::Asc => compare_recipes(a, b, query.sort),
            SortOrder::Desc => compare_recipes(b, a, query.sort),
        });

        Ok(recipes
            .into_iter()
            .skip(usize::try_from(query.offset).unwrap_or(0))
            .take(usize::try_from(query.limit).unwrap_or(0))
            .collect())
    }

    async fn create(&self, recipe: &Recipe) -> RepoResult<()> {
        let mut recipes = self.0.recipes.lock();
        if recipes.contains_key(&recipe.id) {
            return Err(DomainError::RecipeAlreadyExists);
        }
        recipes.insert(recipe.id, recipe.clone());
        Ok(())
    }

    async fn update(&self, recipe: &Recipe) -> RepoResult<()> {
        let mut recipes = self.0.recipes.lock();
        let stored = recipes
            .get_mut(&recipe.id)
            .ok_or(DomainError::RecipeNotFound(recipe.id))?;

        let stats = stored.rating_stats();
        *stored = recipe.clone();
        stored.set_rating_stats(stats);
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        if self.0.recipes.lock().remove(&id).is_none() {
            return Err(DomainError::RecipeNotFound(id));
        }
        self.0.ratings.lock().retain(|_, r| r.recipe_id != id);
        self.0.comments.lock().retain(|_, c| c.recipe_id != id);
        Ok(())
    }

    async fn apply_rating_change(
        &self,
        recipe_id: Snowflake,
        change: RatingChange,
    ) -> RepoResult<Recipe> {
        Faults::check(&self.0.faults.stats_update, "apply_rating_change")?;

        let mut recipes = self.0.recipes.lock();
        let recipe = recipes
            .get_mut(&recipe_id)
            .ok_or(DomainError::RecipeNotFound(recipe_id))?;

        let next = recipe.rating_stats().apply(change)?;
        recipe.set_rating_stats(next);
        Ok(recipe.clone())
    }

    async fn set_rating_stats(
        &self,
        recipe_id: Snowflake,
        stats: RatingStats,
    ) -> RepoResult<Recipe> {
        let mut recipes = self.0.recipes.lock();
        let recipe = recipes
            .get_mut(&recipe_id)
            .ok_or(DomainError::RecipeNotFound(recipe_id))?;

        recipe.set_rating_stats(stats);
        Ok(recipe.clone())
    }
}

// ============================================================================
// Ratings
// ============================================================================

pub struct MemoryRatingRepository(Arc<MemoryStore>);

#[async_trait]
impl RatingRepository for MemoryRatingRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Rating>> {
        Ok(self.0.rating(id))
    }

    async fn find_by_recipe_and_user(
        &self,
        recipe_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Rating>> {
        Ok(self
            .0
            .ratings
            .lock()
            .values()
            .find(|r| r.recipe_id == recipe_id && r.user_id == user_id)
            .cloned())
    }

    async fn find_by_recipe(&self, recipe_id: Snowflake) -> RepoResult<Vec<Rating>> {
        let mut ratings: Vec<Rating> = self
            .0
            .ratings
            .lock()
            .values()
            .filter(|r| r.recipe_id == recipe_id)
            .cloned()
            .collect();
        ratings.sort_by_key(|r| (r.created_at, r.id));
        Ok(ratings)
    }

    async fn create(&self, rating: &Rating) -> RepoResult<()> {
        if !self.0.recipes.lock().contains_key(&rating.recipe_id) {
            return Err(DomainError::RecipeNotFound(rating.recipe_id));
        }

        let mut ratings = self.0.ratings.lock();
        if ratings
            .values()
            .any(|r| r.recipe_id == rating.recipe_id && r.user_id == rating.user_id)
        {
            return Err(DomainError::RatingAlreadyExists);
        }
        ratings.insert(rating.id, rating.clone());
        Ok(())
    }

    async fn replace_score(&self, rating: &Rating, expected: Score) -> RepoResult<bool> {
        let mut ratings = self.0.ratings.lock();
        match ratings.get_mut(&rating.id) {
            Some(stored) if stored.score == expected => {
                stored.score = rating.score;
                stored.updated_at = rating.updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        Faults::check(&self.0.faults.rating_delete, "rating delete")?;

        self.0
            .ratings
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::RatingNotFound(id))
    }

    async fn summarize(&self, recipe_id: Snowflake) -> RepoResult<RatingStats> {
        let ratings = self.0.ratings.lock();
        Ok(RatingStats::from_scores(
            ratings
                .values()
                .filter(|r| r.recipe_id == recipe_id)
                .map(|r| r.score),
        ))
    }
}

// ============================================================================
// Comments
// ============================================================================

pub struct MemoryCommentRepository(Arc<MemoryStore>);

impl MemoryCommentRepository {
    fn collect_sorted(&self, keep: impl Fn(&Comment) -> bool) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .0
            .comments
            .lock()
            .values()
            .filter(|c| keep(c))
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        comments
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.0.comments.lock().get(&id).cloned())
    }

    async fn find_top_level(&self, recipe_id: Snowflake) -> RepoResult<Vec<Comment>> {
        Ok(self.collect_sorted(|c| c.recipe_id == recipe_id && c.parent_comment_id.is_none()))
    }

    async fn find_replies(&self, parent_id: Snowflake) -> RepoResult<Vec<Comment>> {
        Ok(self.collect_sorted(|c| c.parent_comment_id == Some(parent_id)))
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let mut comments = self.0.comments.lock();
        if comments.contains_key(&comment.id) {
            return Err(DomainError::CommentAlreadyExists);
        }
        comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let mut comments = self.0.comments.lock();
        let stored = comments
            .get_mut(&comment.id)
            .ok_or(DomainError::CommentNotFound(comment.id))?;
        stored.content.clone_from(&comment.content);
        stored.updated_at = comment.updated_at;
        Ok(())
    }

    async fn mark_has_children(&self, id: Snowflake) -> RepoResult<()> {
        let mut comments = self.0.comments.lock();
        let stored = comments
            .get_mut(&id)
            .ok_or(DomainError::CommentNotFound(id))?;
        stored.has_children = true;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut comments = self.0.comments.lock();
        if comments.remove(&id).is_none() {
            return Err(DomainError::CommentNotFound(id));
        }

        // Same reach as ON DELETE CASCADE on parent_comment_id
        let mut doomed = vec![id];
        while let Some(parent) = doomed.pop() {
            let children: Vec<Snowflake> = comments
                .values()
                .filter(|c| c.parent_comment_id == Some(parent))
                .map(|c| c.id)
                .collect();
            for child in children {
                comments.remove(&child);
                doomed.push(child);
            }
        }
        Ok(())
    }
}

// ============================================================================
// Health
// ============================================================================

pub struct MemoryHealthProbe(Arc<MemoryStore>);

#[async_trait]
impl HealthProbe for MemoryHealthProbe {
    async fn ping(&self) -> RepoResult<()> {
        Faults::check(&self.0.faults.database_down, "ping")
    }
}
