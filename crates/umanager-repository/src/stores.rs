//! Wiring of both stores from application configuration.

use crate::{
    DatabasePool, DocumentStore, InMemoryLinkRepository, InMemoryUserRepository, LinkRepository,
    MongoLinkRepository, PgUserRepository, UserRepository,
};
use std::sync::Arc;
use tracing::info;
use umanager_config::AppConfig;
use umanager_core::UmanagerResult;

/// The link and user stores behind trait objects, plus the connection
/// handles they share.
#[derive(Clone)]
pub struct Stores {
    pub links: Arc<dyn LinkRepository>,
    pub users: Arc<dyn UserRepository>,
    backends: Option<Backends>,
}

#[derive(Clone, Debug)]
struct Backends {
    database: Arc<DatabasePool>,
    documents: DocumentStore,
}

impl Stores {
    /// Connects to PostgreSQL and MongoDB and builds both repositories.
    /// Every repository operation is bounded by
    /// `storage.operation_timeout_ms`.
    pub async fn connect(config: &AppConfig) -> UmanagerResult<Self> {
        let timeout = config.storage.operation_timeout();

        let database = Arc::new(DatabasePool::connect(&config.database).await?);
        let documents = DocumentStore::connect(&config.document_store).await?;

        info!(
            "Stores ready (operation timeout {}ms)",
            config.storage.operation_timeout_ms
        );

        Ok(Self {
            links: Arc::new(MongoLinkRepository::from_store(&documents, timeout)),
            users: Arc::new(PgUserRepository::new(database.clone(), timeout)),
            backends: Some(Backends {
                database,
                documents,
            }),
        })
    }

    /// Builds stores backed by process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            links: Arc::new(InMemoryLinkRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            backends: None,
        }
    }

    /// Checks both backends. In-memory stores are always healthy.
    pub async fn health_check(&self) -> UmanagerResult<()> {
        if let Some(backends) = &self.backends {
            backends.database.health_check().await?;
            backends.documents.health_check().await?;
        }
        Ok(())
    }

    /// Closes the connection pools.
    pub async fn close(&self) {
        if let Some(backends) = &self.backends {
            backends.database.close().await;
            backends.documents.close().await;
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("backends", &self.backends)
            .finish_non_exhaustive()
    }
}
