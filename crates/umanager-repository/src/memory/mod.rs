//! In-memory repository implementations.
//!
//! Same contracts as the database-backed stores, kept in process memory.
//! Intended as test doubles for code that depends on the repository
//! traits.

mod link_repository;
mod user_repository;

pub use link_repository::InMemoryLinkRepository;
pub use user_repository::InMemoryUserRepository;
