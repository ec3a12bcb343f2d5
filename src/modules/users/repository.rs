use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::directory::{DirectoryError, UserDirectory};
use super::model::{NewUser, User};

/// PostgreSQL-backed [`UserDirectory`] over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    full_name: String,
    email: String,
    password: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DirectoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse()
            .map_err(|e| DirectoryError::InvalidRecord(format!("user {}: {}", row.id, e)))?;

        Ok(User {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            role,
            is_active: row.is_active,
            password_hash: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, full_name, email, password, role, is_active, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DirectoryError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, full_name, email, password, role, is_active, created_at, updated_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> Result<bool, DirectoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    async fn insert(&self, user: NewUser) -> Result<User, DirectoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, full_name, email, password, role, is_active)
             VALUES ($1, $2, $3, $4, $5, TRUE)
             RETURNING id, full_name, email, password, role, is_active, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                DirectoryError::DuplicateEmail
            }
            other => DirectoryError::Database(other),
        })?;

        User::try_from(row)
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: Uuid, active: bool) -> Result<Option<User>, DirectoryError> {
        sqlx::query_as::<_, UserRow>(
            "UPDATE users SET is_active = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING id, full_name, email, password, role, is_active, created_at, updated_at",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }
}
