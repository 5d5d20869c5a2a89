//! In-memory link repository.

use crate::traits::LinkRepository;
use async_trait::async_trait;
use tokio::sync::RwLock;
use umanager_core::{CreateLinkRequest, Link, LinkCriteria, LinkFilter, UmanagerResult};

/// Link repository kept in insertion order in process memory.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: RwLock<Vec<Link>>,
}

impl InMemoryLinkRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, request: CreateLinkRequest) -> UmanagerResult<Link> {
        let link = Link::new(request);
        self.links.write().await.push(link.clone());
        Ok(link)
    }

    async fn find_by_user_and_url(&self, url: &str, user_id: &str) -> UmanagerResult<Option<Link>> {
        let filter = LinkFilter::by_user_and_url(url, user_id);
        Ok(self
            .links
            .read()
            .await
            .iter()
            .find(|link| filter.matches(link))
            .cloned())
    }

    async fn find_by_criteria(&self, criteria: &LinkCriteria) -> UmanagerResult<Vec<Link>> {
        let filter = criteria.filter();
        let links = self.links.read().await;
        Ok(criteria.paginate(links.iter().filter(|link| filter.matches(link)).cloned()))
    }
}
