//! PostgreSQL user repository implementation.

use crate::{timeout::with_timeout, traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use umanager_core::{CreateUserRequest, UmanagerResult, User, UserId};
use uuid::Uuid;

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Arc<DatabasePool>,
    timeout: Duration,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository. Every operation is bounded
    /// by `timeout`.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::from_uuid(row.id),
            username: row.username,
            password: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, request: CreateUserRequest) -> UmanagerResult<User> {
        let user = User::new(request);
        debug!("Creating user: {} ({})", user.username, user.id);

        let row = with_timeout(
            "users.create",
            self.timeout,
            sqlx::query_as::<_, UserRow>(
                r#"
                INSERT INTO users (id, username, password, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, username, password, created_at, updated_at
                "#,
            )
            .bind(user.id.into_inner())
            .bind(&user.username)
            .bind(&user.password)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(self.pool.inner()),
        )
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: UserId) -> UmanagerResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = with_timeout(
            "users.find_by_id",
            self.timeout,
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, username, password, created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner()),
        )
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> UmanagerResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let row = with_timeout(
            "users.find_by_username",
            self.timeout,
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, username, password, created_at, updated_at
                FROM users
                WHERE username = $1
                "#,
            )
            .bind(username)
            .fetch_optional(self.pool.inner()),
        )
        .await?;

        Ok(row.map(User::from))
    }
}

impl std::fmt::Debug for PgUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgUserRepository")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::silent_listener;
    use sqlx::postgres::PgPoolOptions;
    use umanager_core::UmanagerError;

    async fn stalled_repository(timeout: Duration) -> PgUserRepository {
        let addr = silent_listener().await;
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(30))
            .connect_lazy(&format!("postgres://umanager:umanager@{addr}/umanager"))
            .unwrap();
        PgUserRepository::new(Arc::new(DatabasePool::with_pool(pool)), timeout)
    }

    #[tokio::test]
    async fn test_find_by_id_times_out_on_stalled_backend() {
        let repo = stalled_repository(Duration::from_millis(100)).await;

        let err = repo.find_by_id(UserId::new()).await.unwrap_err();
        assert!(matches!(
            err,
            UmanagerError::Timeout { operation: "users.find_by_id", .. }
        ));
    }

    #[tokio::test]
    async fn test_create_times_out_on_stalled_backend() {
        let repo = stalled_repository(Duration::from_millis(100)).await;

        let err = repo
            .create(CreateUserRequest {
                username: "alice".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_find_by_username_times_out_on_stalled_backend() {
        let repo = stalled_repository(Duration::from_millis(100)).await;

        let started = std::time::Instant::now();
        let err = repo.find_by_username("alice").await.unwrap_err();
        assert!(err.is_timeout());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
