//! Tracing setup for the binaries in this workspace.
//!
//! Logs go to stderr through a compact formatter so stdout stays free for
//! command output. `RUST_LOG` controls filtering and defaults to `info`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. Call once, before the first log event.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
