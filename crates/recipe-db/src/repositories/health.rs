//! PostgreSQL implementation of HealthProbe

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use recipe_core::traits::{HealthProbe, RepoResult};

use super::error::map_db_error;

/// Readiness probe issuing `SELECT 1` through the pool
#[derive(Clone)]
pub struct PgHealthProbe {
    pool: PgPool,
}

impl PgHealthProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgHealthProbe {
    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
