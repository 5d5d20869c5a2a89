//! # umanager Core
//!
//! Entities, identifiers, query criteria, and error definitions shared by
//! the umanager link and user stores.

pub mod criteria;
pub mod domain;
pub mod error;
pub mod id;
pub mod telemetry;

pub use criteria::*;
pub use domain::*;
pub use error::*;
pub use id::*;
pub use telemetry::{init_tracing, LogFormat};
