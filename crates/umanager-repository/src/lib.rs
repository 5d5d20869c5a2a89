//! # umanager Repository
//!
//! Persistence for the two umanager entities:
//!
//! ```text
//! Caller
//!   ↓  Arc<dyn LinkRepository> / Arc<dyn UserRepository>
//! MongoLinkRepository          PgUserRepository
//!   ↓  DocumentStore             ↓  DatabasePool
//! MongoDB (links)              PostgreSQL (users)
//! ```
//!
//! Every backend operation runs under a per-call deadline (see
//! [`with_timeout`]). Lookups that find nothing return `Ok(None)`; only
//! backend failures and elapsed deadlines are errors.
//!
//! The [`memory`] module provides in-process implementations of both
//! traits for tests and local wiring.

pub mod memory;
pub mod mongo;
pub mod pool;
pub mod postgres;
pub mod stores;
pub mod timeout;
pub mod traits;

pub use memory::{InMemoryLinkRepository, InMemoryUserRepository};
pub use mongo::{MongoLinkRepository, LINKS_COLLECTION};
pub use pool::{DatabasePool, DocumentStore};
pub use postgres::PgUserRepository;
pub use stores::Stores;
pub use timeout::with_timeout;
pub use traits::*;
