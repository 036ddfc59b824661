//! Logging Setup
//!
//! Both binaries log through `tracing` to stderr so stdout stays free for
//! user output and the stats JSON.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "PROJECT_MEMORY_LOG";

/// Filter used when `PROJECT_MEMORY_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the global fmt subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
