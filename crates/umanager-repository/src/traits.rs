//! Repository trait definitions.

use async_trait::async_trait;
use umanager_core::{CreateLinkRequest, CreateUserRequest, Link, LinkCriteria, User, UserId};
use umanager_core::UmanagerResult;

/// Link repository trait.
///
/// Finders return `Ok(None)` / an empty vector when nothing matches; any
/// `Err` is a transport, driver, or timeout failure.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Assigns a fresh identifier, stores the link, and returns it.
    async fn create(&self, request: CreateLinkRequest) -> UmanagerResult<Link>;

    /// Finds the link with exactly this URL and owner.
    async fn find_by_user_and_url(&self, url: &str, user_id: &str) -> UmanagerResult<Option<Link>>;

    /// Lists links matching the criteria, in insertion order, after
    /// applying offset and limit.
    async fn find_by_criteria(&self, criteria: &LinkCriteria) -> UmanagerResult<Vec<Link>>;
}

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Assigns a fresh identifier and timestamps, stores the user, and
    /// returns the stored row.
    async fn create(&self, request: CreateUserRequest) -> UmanagerResult<User>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> UmanagerResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> UmanagerResult<Option<User>>;
}
