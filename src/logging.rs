//! Logging setup for the application.
//!
//! Installs a global tracing subscriber writing to stdout. The filter
//! comes from `RUST_LOG` when set, defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Initialize tracing. Subsequent calls are no-ops.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}
