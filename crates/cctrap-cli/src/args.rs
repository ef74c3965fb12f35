use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cctrap-results")]
#[command(about = "Inspect the results log written by the cctrap compiler trap", long_about = None)]
#[command(version)]
pub struct ResultsCli {
    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: ResultsCommand,
}

#[derive(Subcommand)]
pub enum ResultsCommand {
    /// List the source files compiled during the build, in log order
    Sources {
        /// Results log to read (defaults to the one this binary was built for)
        file: Option<PathBuf>,

        /// Print each source only once
        #[arg(long)]
        unique: bool,
    },

    /// Show every logged invocation with its command line
    Records {
        /// Results log to read (defaults to the one this binary was built for)
        file: Option<PathBuf>,
    },

    /// Show the host compiler and results log compiled into cctrap
    Config,
}
