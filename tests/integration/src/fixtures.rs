//! Test fixtures and data generators
//!
//! Wire-level request and response shapes, kept separate from the service
//! DTOs so the tests check the JSON the API actually speaks.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::seq::SliceRandom;
use rand::Rng;
use recipe_core::entities::{Difficulty, Recipe};
use recipe_core::Snowflake;
use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A uniformly random valid score
pub fn random_score() -> i32 {
    rand::thread_rng().gen_range(1..=5)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            first_name: "Julia".to_string(),
            last_name: format!("Child{suffix}"),
            email: format!("cook{suffix}@example.com"),
            password: "Souffle123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: CurrentUserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// Current user response
#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Create recipe request
#[derive(Debug, Serialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: Option<String>,
    pub preparation_time: Option<i32>,
    pub difficulty: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl CreateRecipeRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Omelette #{suffix}"),
            description: Some("Quick breakfast".to_string()),
            preparation_time: Some(10),
            difficulty: "easy".to_string(),
            ingredients: vec!["egg".to_string(), "butter".to_string()],
            steps: vec!["Whisk".to_string(), "Fry".to_string()],
        }
    }

    pub fn with_ingredients(mut self, ingredients: &[&str], minutes: i32) -> Self {
        self.ingredients = ingredients.iter().map(ToString::to_string).collect();
        self.preparation_time = Some(minutes);
        self
    }
}

/// Recipe response
#[derive(Debug, Deserialize)]
pub struct RecipeResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub preparation_time: Option<i32>,
    pub difficulty: String,
    pub ingredients: Vec<String>,
    pub average_rating: f64,
    pub number_of_ratings: i64,
}

/// Paginated listing
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

/// Create rating request
#[derive(Debug, Serialize)]
pub struct CreateRatingRequest {
    pub recipe_id: String,
    pub rating: i32,
}

/// Update rating request
#[derive(Debug, Serialize)]
pub struct UpdateRatingRequest {
    pub rating: Option<i32>,
}

/// Rating response
#[derive(Debug, Deserialize)]
pub struct RatingResponse {
    pub id: String,
    pub user_id: String,
    pub recipe_id: String,
    pub rating: u8,
}

/// Statistics as reported by the reconcile endpoint
#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub average: f64,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReconcileResponse {
    pub recipe_id: String,
    pub previous: StatsResponse,
    pub current: StatsResponse,
    pub drifted: bool,
}

/// Create comment request
#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub recipe_id: String,
    pub parent_comment_id: Option<String>,
    pub content: String,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub recipe_id: String,
    pub parent_comment_id: Option<String>,
    pub content: String,
    pub has_children: bool,
}

/// A recipe entity for seeding the in-memory store directly
pub fn recipe_entity(id: Snowflake, author: Snowflake) -> Recipe {
    let mut ingredients = vec!["rice".to_string(), "saffron".to_string(), "stock".to_string()];
    ingredients.shuffle(&mut rand::thread_rng());

    Recipe::new(
        id,
        author,
        format!("Risotto #{}", unique_suffix()),
        Difficulty::Medium,
        ingredients,
        vec!["Toast rice".to_string(), "Add stock slowly".to_string()],
    )
}
