//! MongoDB repository implementations.

pub mod filter;
mod link_repository;

pub use link_repository::{MongoLinkRepository, LINKS_COLLECTION};
