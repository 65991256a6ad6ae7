//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Comment, Rating, Recipe, User};
use crate::error::DomainError;
use crate::value_objects::{RatingChange, RatingStats, Score, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Soft delete a user
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Recipe Repository
// ============================================================================

/// Column a recipe listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeSort {
    #[default]
    UpdatedAt,
    CreatedAt,
    AverageRating,
    NumberOfRatings,
    PreparationTime,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filters and paging for recipe listings
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeQuery {
    /// Recipe must contain every listed ingredient
    pub ingredients: Vec<String>,
    /// `average_rating >= min_rating`
    pub min_rating: Option<f64>,
    /// `preparation_time <= max_time` (minutes)
    pub max_time: Option<i32>,
    pub author_id: Option<Snowflake>,
    pub sort: RecipeSort,
    pub order: SortOrder,
    pub limit: i64,
    pub offset: i64,
}

impl Default for RecipeQuery {
    fn default() -> Self {
        Self {
            ingredients: Vec::new(),
            min_rating: None,
            max_time: None,
            author_id: None,
            sort: RecipeSort::default(),
            order: SortOrder::default(),
            limit: 10,
            offset: 0,
        }
    }
}

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Find recipe by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Recipe>>;

    /// All recipes authored by a user, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Recipe>>;

    /// Filtered, sorted, paginated listing
    async fn search(&self, query: &RecipeQuery) -> RepoResult<Vec<Recipe>>;

    /// Create a new recipe
    async fn create(&self, recipe: &Recipe) -> RepoResult<()>;

    /// Persist descriptive fields only. The rating statistics are left as stored.
    async fn update(&self, recipe: &Recipe) -> RepoResult<()>;

    /// Delete a recipe together with its ratings and comments
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Atomically fold one rating change into the recipe's statistics.
    ///
    /// Read, compute and write happen as one unit per recipe, so concurrent
    /// changes to the same recipe never lose an update. Returns the recipe
    /// with its new statistics.
    async fn apply_rating_change(
        &self,
        recipe_id: Snowflake,
        change: RatingChange,
    ) -> RepoResult<Recipe>;

    /// Overwrite the statistics wholesale (repair path)
    async fn set_rating_stats(&self, recipe_id: Snowflake, stats: RatingStats)
        -> RepoResult<Recipe>;
}

// ============================================================================
// Rating Repository
// ============================================================================

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Find rating by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Rating>>;

    /// Find the single rating a user gave a recipe
    async fn find_by_recipe_and_user(
        &self,
        recipe_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Rating>>;

    /// All ratings of a recipe, oldest first
    async fn find_by_recipe(&self, recipe_id: Snowflake) -> RepoResult<Vec<Rating>>;

    /// Insert a rating. A second rating for the same (user, recipe) fails with
    /// [`DomainError::RatingAlreadyExists`].
    async fn create(&self, rating: &Rating) -> RepoResult<()>;

    /// Persist score and `updated_at` only while the stored score is still
    /// `expected`. Returns `false` when the rating is gone or holds another
    /// score, in which case nothing was written.
    async fn replace_score(&self, rating: &Rating, expected: Score) -> RepoResult<bool>;

    /// Delete a rating
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Exact statistics computed from the stored ratings of a recipe
    async fn summarize(&self, recipe_id: Snowflake) -> RepoResult<RatingStats>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Top-level comments of a recipe, oldest first
    async fn find_top_level(&self, recipe_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Direct replies to a comment, oldest first
    async fn find_replies(&self, parent_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Update comment content
    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Flag a comment as having replies
    async fn mark_has_children(&self, id: Snowflake) -> RepoResult<()>;

    /// Delete a comment and its replies
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Health
// ============================================================================

/// Backing-store connectivity check used by readiness probes
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Succeeds when the store can serve queries
    async fn ping(&self) -> RepoResult<()>;
}
