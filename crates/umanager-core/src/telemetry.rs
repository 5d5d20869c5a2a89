//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events; the embedding binary (or a
//! test fixture) installs a subscriber once through [`init_tracing`].

use crate::{UmanagerError, UmanagerResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = UmanagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(UmanagerError::configuration(format!(
                "Unknown log format: {other}"
            ))),
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_directives` when set. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(default_directives: &str, format: LogFormat) -> UmanagerResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives))
        .map_err(|e| UmanagerError::configuration(format!("Invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
    };

    result.map_err(|e| UmanagerError::internal(format!("Failed to install subscriber: {e}")))?;

    tracing::info!(format = %format, "Tracing initialized");
    Ok(())
}
