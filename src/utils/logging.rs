// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Installs the global tracing subscriber for the statement job.
/// `RUST_LOG` wins when set; otherwise everything at INFO and above is printed.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("Logging initialised with default filter '{}'", DEFAULT_FILTER);
}
