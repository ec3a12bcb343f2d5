//! The user directory seam used by authentication.
//!
//! [`UserDirectory`] is implemented by [`PgUserDirectory`](super::repository::PgUserDirectory)
//! for production and by [`InMemoryUserDirectory`] for tests and local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use eduextra_core::AppError;

use super::model::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid user record: {0}")]
    InvalidRecord(String),
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateEmail => AppError::conflict(err),
            other => AppError::internal(other),
        }
    }
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DirectoryError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DirectoryError>;

    /// Fails with [`DirectoryError::DuplicateEmail`] if the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, DirectoryError>;

    /// Returns the updated user, or `None` if no user has this id.
    async fn set_active(&self, id: Uuid, active: bool) -> Result<Option<User>, DirectoryError>;
}

/// Directory backed by a map keyed on email.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DirectoryError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DirectoryError> {
        Ok(self.users.read().await.contains_key(email))
    }

    async fn insert(&self, user: NewUser) -> Result<User, DirectoryError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(DirectoryError::DuplicateEmail);
        }

        let now = Utc::now();
        let record = User {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            is_active: true,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.email.clone(), record.clone());
        Ok(record)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Option<User>, DirectoryError> {
        let mut users = self.users.write().await;
        let Some(user) = users.values_mut().find(|user| user.id == id) else {
            return Ok(None);
        };

        user.is_active = active;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduextra_auth::Role;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            full_name: "Jane Doe".to_string(),
            email: email.to_string(),
            role: Role::Student,
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let directory = InMemoryUserDirectory::new();
        let user = directory.insert(new_user("jane@x.com")).await.unwrap();

        assert!(user.is_active);
        assert!(directory.exists_by_email("jane@x.com").await.unwrap());
        assert!(!directory.exists_by_email("bob@x.com").await.unwrap());

        let by_email = directory.find_by_email("jane@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        let by_id = directory.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "jane@x.com");
    }

    #[tokio::test]
    async fn test_insert_duplicate_email() {
        let directory = InMemoryUserDirectory::new();
        directory.insert(new_user("jane@x.com")).await.unwrap();

        let result = directory.insert(new_user("jane@x.com")).await;
        assert!(matches!(result, Err(DirectoryError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_set_active() {
        let directory = InMemoryUserDirectory::new();
        let user = directory.insert(new_user("jane@x.com")).await.unwrap();

        let updated = directory.set_active(user.id, false).await.unwrap().unwrap();
        assert!(!updated.is_active);
        assert!(
            !directory
                .find_by_email("jane@x.com")
                .await
                .unwrap()
                .unwrap()
                .is_active
        );

        assert!(directory.set_active(Uuid::new_v4(), false).await.unwrap().is_none());
    }
}
