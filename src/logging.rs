//! Tracing initialization for the command-line tool.

use std::io;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV_VAR: &str = "METADATA_EXPLORER_LOG";

static INIT: Once = Once::new();

/// Filter used when [`LOG_ENV_VAR`] is unset or invalid
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "metadata_explorer=info" } else { "metadata_explorer=warn" }
}

/// Install a stderr subscriber filtered by `METADATA_EXPLORER_LOG`
///
/// Example: `METADATA_EXPLORER_LOG=metadata_explorer::store=debug`.
/// Safe to call more than once; only the first call has an effect.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(filter)
            .init();
    });
}
