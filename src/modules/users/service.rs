use std::sync::Arc;

use anyhow::anyhow;
use tracing::{info, instrument};
use uuid::Uuid;

use eduextra_core::AppError;

use super::directory::UserDirectory;
use super::model::{User, UserResponse};

/// Account operations over the user directory.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserDirectory>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    /// Loads the profile of the user identified by a token subject.
    #[instrument(skip(self))]
    pub async fn get_profile(&self, email: &str) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn enable_user(&self, id: Uuid) -> Result<UserResponse, AppError> {
        let user = self.set_active(id, true).await?;
        info!(user_id = %user.id, email = %user.email, "User account enabled");
        Ok(user.into())
    }

    /// Outstanding access tokens stay valid until they expire; refresh is
    /// refused from now on.
    #[instrument(skip(self))]
    pub async fn disable_user(&self, id: Uuid) -> Result<UserResponse, AppError> {
        let user = self.set_active(id, false).await?;
        info!(user_id = %user.id, email = %user.email, "User account disabled");
        Ok(user.into())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<User, AppError> {
        self.users
            .set_active(id, active)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User with id {} not found", id)))
    }
}
