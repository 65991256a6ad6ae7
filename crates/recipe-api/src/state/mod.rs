//! Shared handler state

use std::sync::Arc;

use recipe_common::{AppConfig, JwtService};
use recipe_service::{
    AuthService, CommentService, RatingService, RecipeService, ServiceContext, UserService,
};

/// Cloned into every request; both halves sit behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(context: ServiceContext, config: AppConfig) -> Self {
        Self {
            context: Arc::new(context),
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.context.jwt_service()
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.context)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.context)
    }

    pub fn recipes(&self) -> RecipeService<'_> {
        RecipeService::new(&self.context)
    }

    pub fn ratings(&self) -> RatingService<'_> {
        RatingService::new(&self.context)
    }

    pub fn comments(&self) -> CommentService<'_> {
        CommentService::new(&self.context)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("app", &self.config.app.name)
            .field("env", &self.config.app.env)
            .field("context", &self.context)
            .finish()
    }
}
