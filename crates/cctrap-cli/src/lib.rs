//! cctrap: a C compiler substitute for build introspection.
//!
//! Point a build's `CC` at the `cctrap` binary. Every compile it issues is
//! recorded in a results log (which source file, with which exact command)
//! and then handed to the real compiler, whose exit status cctrap returns.
//! The real compiler and the log location are fixed when cctrap is built:
//!
//! ```text
//! CCTRAP_HOST_COMPILER=gcc CCTRAP_RESULTS_FILE=/work/results.txt cargo build --release
//! make CC=/path/to/cctrap
//! cctrap-results sources /work/results.txt
//! ```

mod args;
mod commands;
pub mod config;
pub mod logging;
pub mod types;

pub use args::{ResultsCli, ResultsCommand};
pub use commands::run;
pub use config::baked_config;
