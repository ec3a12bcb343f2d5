//! # EduExtra DB
//!
//! PostgreSQL connection pool initialization using SQLx.
//!
//! # Example
//!
//! ```ignore
//! use eduextra_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool().await;
//!     eduextra_db::run_migrations(&pool).await.expect("migrations failed");
//! }
//! ```

use std::env;

use sqlx::postgres::PgPoolOptions;

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// `DATABASE_MAX_CONNECTIONS` caps the pool size (default: 10).
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection fails. This is only
/// called during process startup.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Applies the migrations embedded from `migrations/` at the workspace root.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
