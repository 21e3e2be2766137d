use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file
pub const LOG_ENV_VAR: &str = "SHOPLIST_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is off unless `SHOPLIST_LOG` names a file, since the TUI owns the
/// terminal. The level filter comes from `RUST_LOG` and defaults to `info`.
/// Returns whether a subscriber was installed.
pub fn init_tracing() -> bool {
    let Some(log_path) = std::env::var_os(LOG_ENV_VAR) else {
        return false;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "Warning: Failed to open log file '{}': {}",
                log_path.to_string_lossy(),
                e
            );
            return false;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok()
}
