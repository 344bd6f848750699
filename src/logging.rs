//! Logging setup for the runner binary.

use std::env;

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Our crate is info, everything else is warn.
const DEFAULT_FILTER: &str = "warn,pixelstep=info";

/// Install a `tracing` subscriber writing to stderr. Accepts
/// ecosystem-standard `RUST_LOG` filters on top of the default.
pub fn init_logging() {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Ok(env_filter) = env::var(EnvFilter::DEFAULT_ENV) {
        filter.push(',');
        filter.push_str(&env_filter);
    }

    let stderr_log = fmt::layer()
        .compact()
        .with_writer(std::io::stderr);

    let subscriber = Registry::default()
        .with(EnvFilter::new(filter))
        .with(stderr_log);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a log subscriber was already installed");
    }
}
