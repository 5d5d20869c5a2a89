//! # umanager domain
//!
//! Entities persisted by the two stores and the requests that create them.
//! Both entities are read-only once created.

pub mod link;
pub mod user;

pub use link::*;
pub use user::*;
