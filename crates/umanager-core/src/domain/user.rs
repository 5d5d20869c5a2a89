//! User entity.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Unique username, used as an alternate lookup key.
    pub username: String,

    /// Credential exactly as supplied by the caller (never serialized).
    #[serde(skip_serializing, default)]
    pub password: String,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Builds a user from a create request with a fresh id and both
    /// timestamps set to now.
    #[must_use]
    pub fn new(request: CreateUserRequest) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username: request.username,
            password: request.password,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields supplied by the caller when registering a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}
