use cctrap_core::TrapConfig;
use cctrap_core::config::{DEFAULT_HOST_COMPILER, DEFAULT_RESULTS_FILE};

const BAKED_HOST_COMPILER: Option<&str> = option_env!("CCTRAP_BAKED_HOST_COMPILER");
const BAKED_RESULTS_FILE: Option<&str> = option_env!("CCTRAP_BAKED_RESULTS_FILE");

/// Configuration compiled into this binary by `build.rs`.
pub fn baked_config() -> TrapConfig {
    TrapConfig::new(
        BAKED_HOST_COMPILER.unwrap_or(DEFAULT_HOST_COMPILER),
        BAKED_RESULTS_FILE.unwrap_or(DEFAULT_RESULTS_FILE),
    )
}

/// Whether each value came from the build environment rather than a default.
pub fn baked_from_env() -> (bool, bool) {
    (BAKED_HOST_COMPILER.is_some(), BAKED_RESULTS_FILE.is_some())
}
