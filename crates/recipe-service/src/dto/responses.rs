//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use recipe_core::entities::Difficulty;
use recipe_core::RatingStats;
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Page of results with offset pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: i64, limit: i64) -> Self {
        let has_more = i64::try_from(data.len()).is_ok_and(|len| len == limit);
        Self {
            data,
            pagination: PaginationMeta {
                page,
                limit,
                has_more,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// 1-based page number
    pub page: i64,
    /// Page size limit used
    pub limit: i64,
    /// A full page was returned, so another may follow
    pub has_more: bool,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The caller's own profile: the public one plus private fields
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    #[serde(flatten)]
    pub profile: UserResponse,
    pub email: String,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Recipe Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<i32>,
    pub difficulty: Difficulty,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_image: Option<String>,
    pub average_rating: f64,
    pub number_of_ratings: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Rating Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RatingResponse {
    pub id: String,
    pub user_id: String,
    pub recipe_id: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of recomputing a recipe's statistics from its ratings
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResponse {
    pub recipe_id: String,
    /// Stored values before the repair
    pub previous: RatingStats,
    /// Values recomputed from the rating set
    pub current: RatingStats,
    pub drifted: bool,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub user_id: String,
    pub recipe_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<String>,
    pub content: String,
    pub has_children: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Probe outcome as reported on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Healthy,
    Unhealthy,
    Ready,
    NotReady,
}

/// Liveness: the process is up and serving
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: ProbeStatus,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: ProbeStatus::Healthy,
            timestamp: Utc::now(),
        }
    }
}

/// Readiness: the process and the database behind it
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: ProbeStatus,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: ProbeStatus,
}

impl ReadinessResponse {
    pub fn from_database(database_healthy: bool) -> Self {
        let (status, database) = if database_healthy {
            (ProbeStatus::Ready, ProbeStatus::Healthy)
        } else {
            (ProbeStatus::NotReady, ProbeStatus::Unhealthy)
        };
        Self {
            status,
            timestamp: Utc::now(),
            checks: HealthChecks { database },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ProbeStatus::Ready
    }
}
