//! stderr logging for both binaries, filtered by `CCTRAP_LOG`.

use crate::types::LogLevel;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `debug`.
pub const LOG_ENV: &str = "CCTRAP_LOG";

/// Installs logging for the trap only when `CCTRAP_LOG` asks for it.
///
/// Builds capture compiler output, so an unconfigured trap stays silent.
pub fn init_trap() {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        install(filter);
    }
}

/// Installs logging at `level` unless `CCTRAP_LOG` overrides it.
pub fn init(level: LogLevel) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    install(filter);
}

fn install(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
