use serde::Serialize;
use std::path::{Path, PathBuf};

/// Compiler used when the build environment does not name one.
pub const DEFAULT_HOST_COMPILER: &str = "cc";

/// Results file used when the build environment does not name one.
pub const DEFAULT_RESULTS_FILE: &str = "/tmp/cctrap-results.txt";

/// The two opaque values a trap binary is built with.
///
/// Neither value is interpreted here: `host_compiler` is pasted verbatim at
/// the head of every proxy command, and `results_path` is only ever appended
/// to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrapConfig {
    pub host_compiler: String,
    pub results_path: PathBuf,
}

impl TrapConfig {
    pub fn new(host_compiler: impl Into<String>, results_path: impl Into<PathBuf>) -> Self {
        Self {
            host_compiler: host_compiler.into(),
            results_path: results_path.into(),
        }
    }

    pub fn host_compiler(&self) -> &str {
        &self.host_compiler
    }

    pub fn results_path(&self) -> &Path {
        &self.results_path
    }
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_COMPILER, DEFAULT_RESULTS_FILE)
    }
}
