use std::io;
use tracing_subscriber::EnvFilter;

/// Log to stdout. `RUST_LOG` overrides the default `info` level.
pub fn configure_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(io::stdout)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
