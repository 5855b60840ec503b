//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the Trellis tracing/logging system.
///
/// Reads the `TRELLIS_LOG` environment variable for per-target log levels.
/// Format: `TRELLIS_LOG=trellis_analysis::binding=debug,trellis_core=info`
///
/// Falls back to `<level>` for the `trellis_core` and
/// `trellis_analysis` targets if `TRELLIS_LOG` is not set or is invalid. `level`
/// usually comes from `LoggingConfig::effective_level`.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing(level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
            let level = level.to_ascii_lowercase();
            EnvFilter::new(format!("trellis_core={level},trellis_analysis={level}"))
        });

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
