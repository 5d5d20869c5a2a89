//! # umanager Config
//!
//! Configuration for the umanager storage layer: connection settings for
//! the relational and document stores, the per-operation timeout, and
//! logging. Supports layered configuration from files and environment
//! variables, with runtime refresh.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
