//! Link entity.

use crate::LinkId;
use serde::{Deserialize, Serialize};

/// A bookmarked link owned by a user.
///
/// Serialized field names match the layout of the `links` collection:
/// the identifier lives in `_id` and the owner in `userid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Unique identifier, assigned at creation.
    #[serde(rename = "_id")]
    pub id: LinkId,

    /// Target URL.
    pub url: String,

    /// Human-readable title.
    pub title: String,

    /// Tags in the order the owner supplied them.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Image references attached to the link.
    #[serde(default)]
    pub images: Vec<String>,

    /// Owning user's identifier.
    #[serde(rename = "userid")]
    pub user_id: String,
}

impl Link {
    /// Builds a link from a create request, assigning a fresh identifier.
    #[must_use]
    pub fn new(request: CreateLinkRequest) -> Self {
        Self {
            id: LinkId::new(),
            url: request.url,
            title: request.title,
            tags: request.tags,
            images: request.images,
            user_id: request.user_id,
        }
    }

    /// Checks whether every tag in `required` is present on this link.
    #[must_use]
    pub fn has_all_tags<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required
            .iter()
            .all(|tag| self.tags.iter().any(|t| t == tag.as_ref()))
    }
}

/// Fields supplied by the caller when creating a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub user_id: String,
}
