//! Core of the cctrap compiler interceptor.
//!
//! A trap binary stands in for the C compiler during a build. Each
//! invocation flows through three stages, strictly in order:
//! - `rewrite`: rebuild the argv as a shell-safe command for the real
//!   compiler and spot the translation unit being compiled
//! - `sink`: append a [`ResultRecord`] to the shared results log
//! - `exec`: run the command through the host shell and hand back its
//!   exit code unchanged
//!
//! `record` also reads a finished results log back for consumers.

pub mod config;
pub mod error;
pub mod exec;
pub mod record;
pub mod rewrite;
pub mod sink;
pub mod trap;

pub use config::TrapConfig;
pub use error::{Error, Result};
pub use exec::{Executor, ShellExecutor, exit_code};
pub use record::{NONE_MARKER, ResultRecord, parse_results, read_results, source_files};
pub use rewrite::{FsProbe, LIBUKLIBID_COMPILER_PREFIX, ProxyCommand, Rewrite, SourceProbe};
pub use sink::{FileSink, MemorySink, ResultSink};
pub use trap::{SPAWN_FAILURE_STATUS, Trap};

use tracing::debug;

/// Builds a trap that logs to the configured results file and delegates
/// through the host shell.
pub fn file_trap(config: &TrapConfig) -> Trap<FileSink, ShellExecutor, FsProbe> {
    debug!(
        host_compiler = config.host_compiler(),
        results = %config.results_path().display(),
        "configured trap"
    );
    Trap::new(
        config.host_compiler(),
        FileSink::new(config.results_path()),
        ShellExecutor::default(),
        FsProbe,
    )
}
