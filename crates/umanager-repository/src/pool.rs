//! Connection handles for the relational and document stores.
//!
//! Both wrap pooled drivers: a `PgPool` for PostgreSQL and a MongoDB
//! `Client` (which pools internally). Cloning either handle is cheap and
//! shares the underlying connections.

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};
use umanager_config::{DatabaseConfig, DocumentStoreConfig};
use umanager_core::UmanagerResult;

/// PostgreSQL connection pool wrapper.
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> UmanagerResult<Self> {
        info!("Connecting to PostgreSQL database...");

        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .inspect_err(|e| warn!("Failed to connect to database: {}", e))?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Wraps an already constructed pool.
    #[must_use]
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.pool
    }

    /// Checks if the database connection is healthy.
    pub async fn health_check(&self) -> UmanagerResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes the database pool.
    pub async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// MongoDB client plus the database that holds the link collection.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    client: Client,
    database: Database,
}

impl DocumentStore {
    /// Builds a client from configuration.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation (or on [`health_check`](Self::health_check)), not
    /// here. Malformed connection strings fail immediately.
    pub async fn connect(config: &DocumentStoreConfig) -> UmanagerResult<Self> {
        info!("Connecting to MongoDB database '{}'...", config.database);

        let mut options = ClientOptions::parse(&config.url)
            .await
            .inspect_err(|e| warn!("Invalid document store URL: {}", e))?;
        if config.app_name.is_some() {
            options.app_name.clone_from(&config.app_name);
        }
        options.min_pool_size = Some(config.min_pool_size);
        options.max_pool_size = Some(config.max_pool_size);
        options.connect_timeout = Some(config.connect_timeout());

        let client = Client::with_options(options)?;
        Ok(Self::with_client(client, &config.database))
    }

    /// Wraps an already constructed client.
    #[must_use]
    pub fn with_client(client: Client, database: &str) -> Self {
        let database = client.database(database);
        Self { client, database }
    }

    /// Returns the target database.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Pings the server.
    pub async fn health_check(&self) -> UmanagerResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Shuts the client down, waiting for in-flight operations.
    pub async fn close(&self) {
        info!("Closing document store client...");
        self.client.clone().shutdown().await;
        info!("Document store client closed");
    }
}
