//! MongoDB link repository implementation.

use super::filter::to_document;
use crate::{timeout::with_timeout, traits::LinkRepository, DocumentStore};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use std::time::Duration;
use tracing::debug;
use umanager_core::{CreateLinkRequest, Link, LinkCriteria, LinkFilter, UmanagerResult};

/// Name of the collection holding link documents.
pub const LINKS_COLLECTION: &str = "links";

/// MongoDB link repository implementation.
#[derive(Clone, Debug)]
pub struct MongoLinkRepository {
    collection: Collection<Link>,
    timeout: Duration,
}

impl MongoLinkRepository {
    /// Creates a repository over the `links` collection of `database`.
    /// Every operation is bounded by `timeout`.
    #[must_use]
    pub fn new(database: &Database, timeout: Duration) -> Self {
        Self {
            collection: database.collection(LINKS_COLLECTION),
            timeout,
        }
    }

    /// Creates a repository from a [`DocumentStore`] handle.
    #[must_use]
    pub fn from_store(store: &DocumentStore, timeout: Duration) -> Self {
        Self::new(store.database(), timeout)
    }
}

#[async_trait]
impl LinkRepository for MongoLinkRepository {
    async fn create(&self, request: CreateLinkRequest) -> UmanagerResult<Link> {
        let link = Link::new(request);
        debug!("Creating link {} for user {}", link.id, link.user_id);

        with_timeout("links.create", self.timeout, self.collection.insert_one(&link)).await?;

        Ok(link)
    }

    async fn find_by_user_and_url(&self, url: &str, user_id: &str) -> UmanagerResult<Option<Link>> {
        debug!("Finding link by user {} and url {}", user_id, url);

        let filter = to_document(&LinkFilter::by_user_and_url(url, user_id));
        with_timeout(
            "links.find_by_user_and_url",
            self.timeout,
            self.collection.find_one(filter),
        )
        .await
    }

    async fn find_by_criteria(&self, criteria: &LinkCriteria) -> UmanagerResult<Vec<Link>> {
        debug!("Finding links by criteria: {:?}", criteria);

        // MongoDB reads a zero limit as "no limit".
        if criteria.limit == Some(0) {
            return Ok(Vec::new());
        }

        let mut find = self
            .collection
            .find(to_document(&criteria.filter()))
            .sort(doc! { "_id": 1 });
        if let Some(offset) = criteria.offset {
            find = find.skip(offset);
        }
        if let Some(limit) = criteria.limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        with_timeout("links.find_by_criteria", self.timeout, async move {
            let cursor = find.await?;
            cursor.try_collect::<Vec<Link>>().await
        })
        .await
    }
}
