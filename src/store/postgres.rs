//! PostgreSQL user store.
//!
//! Persists users in a single `users` table through a sqlx [`PgPool`]. The pool
//! carries its own concurrency guarantees, so one `PostgresStore` is shared by
//! every dispatcher worker without further locking.
//!
//! # Example
//!
//! ```no_run
//! use user_dispatch::store::PostgresStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PostgresStore::connect("postgresql://localhost/users").await?;
//! store.ensure_schema().await?;
//! # Ok(())
//! # }
//! ```

use super::{StoreError, UserStore};
use crate::model::{NewUser, User, UserId};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id    BIGSERIAL PRIMARY KEY,
    name  TEXT    NOT NULL,
    email TEXT    NOT NULL,
    age   INTEGER NOT NULL
)
"#;

fn database_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |e| {
        error!(operation, error = %e, "Database call failed");
        StoreError::Database(format!("{operation}: {e}"))
    }
}

/// PostgreSQL-backed [`UserStore`].
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wraps an existing pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `url`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(url).await.map_err(database_error("connect"))?;
        Ok(Self::new(pool))
    }

    /// Creates the `users` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the DDL statement fails.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(database_error("ensure_schema"))?;
        info!("Schema ready");
        Ok(())
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>("SELECT id, name, email, age FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("find_by_id"))
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, age)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, age
            "#,
        )
        .bind(user.name)
        .bind(user.email)
        .bind(user.age)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("insert"))
    }

    async fn update_by_id(&self, id: UserId, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, email = $2, age = $3
            WHERE id = $4
            RETURNING id, name, email, age
            "#,
        )
        .bind(user.name)
        .bind(user.email)
        .bind(user.age)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("update_by_id"))?
        .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error("delete"))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
