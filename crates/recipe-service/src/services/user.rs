//! Profiles and account removal

use recipe_core::entities::User;
use recipe_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CurrentUserResponse, UpdateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

/// Copy the supplied fields onto `user`; reports whether anything was set
fn apply_profile_patch(user: &mut User, patch: UpdateUserRequest) -> bool {
    let UpdateUserRequest {
        first_name,
        last_name,
        bio,
        profile_image,
    } = patch;

    let mut changed = false;
    if let Some(name) = first_name {
        user.first_name = name.trim().to_owned();
        changed = true;
    }
    if let Some(name) = last_name {
        user.last_name = name.trim().to_owned();
        changed = true;
    }
    if bio.is_some() {
        user.bio = bio;
        changed = true;
    }
    if profile_image.is_some() {
        user.profile_image = profile_image;
        changed = true;
    }
    changed
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public profile of any live account
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self.get_user_entity(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// The caller's own profile, email included
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self.get_user_entity(user_id).await?;
        Ok(CurrentUserResponse::from(&user))
    }

    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: Snowflake) -> ServiceResult<User> {
        match self.ctx.user_repo().find_by_id(user_id).await? {
            Some(user) => Ok(user),
            None => Err(DomainError::UserNotFound(user_id).into()),
        }
    }

    /// Partial profile update; an empty patch writes nothing
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self.get_user_entity(user_id).await?;

        if apply_profile_patch(&mut user, request) {
            user.touch();
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user_id, "Profile updated");
        }

        Ok(CurrentUserResponse::from(&user))
    }

    /// Soft-delete the account.
    ///
    /// The user's ratings stay, so the statistics of recipes they rated
    /// are unchanged.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: Snowflake) -> ServiceResult<()> {
        let user = self.get_user_entity(user_id).await?;
        self.ctx.user_repo().delete(user_id).await?;

        info!(user_id = %user_id, name = %user.full_name(), "Account deleted");
        Ok(())
    }
}
