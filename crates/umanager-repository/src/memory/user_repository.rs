//! In-memory user repository.

use crate::traits::UserRepository;
use async_trait::async_trait;
use tokio::sync::RwLock;
use umanager_core::{CreateUserRequest, UmanagerResult, User, UserId};

/// User repository kept in process memory.
///
/// Username uniqueness is not enforced here; the PostgreSQL schema owns
/// that constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, request: CreateUserRequest) -> UmanagerResult<User> {
        let user = User::new(request);
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> UmanagerResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> UmanagerResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}
