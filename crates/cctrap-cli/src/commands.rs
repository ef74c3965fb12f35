use crate::args::{ResultsCli, ResultsCommand};
use crate::config::{baked_config, baked_from_env};
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use cctrap_core::{NONE_MARKER, ResultRecord, read_results, source_files};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn run(cli: ResultsCli) -> Result<()> {
    match cli.command {
        ResultsCommand::Sources { file, unique } => {
            let records = load(file)?;
            let mut sources = source_files(&records);
            if unique {
                let mut seen = HashSet::new();
                sources.retain(|source| seen.insert(*source));
            }
            print_sources(&sources, cli.format)
        }
        ResultsCommand::Records { file } => {
            let records = load(file)?;
            print_records(&records, cli.format)
        }
        ResultsCommand::Config => print_config(cli.format),
    }
}

fn load(file: Option<PathBuf>) -> Result<Vec<ResultRecord>> {
    let path = file.unwrap_or_else(|| baked_config().results_path);
    debug!(path = %path.display(), "reading results log");
    read_results(&path).with_context(|| format!("Failed to read results log {}", path.display()))
}

fn print_sources(sources: &[&OsStr], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let sources: Vec<_> = sources.iter().map(|source| source.to_string_lossy()).collect();
            println!("{}", serde_json::to_string_pretty(&sources)?);
        }
        OutputFormat::Plain => {
            let mut out = io::stdout().lock();
            for source in sources {
                out.write_all(source.as_encoded_bytes())?;
                out.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// Plain output writes paths and commands as raw bytes, so a non-UTF-8 name
/// prints exactly as the compiler saw it. JSON output is lossy.
fn print_records(records: &[ResultRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Plain => {
            let color = io::stdout().is_terminal();
            let mut out = io::stdout().lock();
            for record in records {
                match record.source_file() {
                    Some(source) => out.write_all(source.as_encoded_bytes())?,
                    None if color => write!(out, "{}", NONE_MARKER.dimmed())?,
                    None => out.write_all(NONE_MARKER.as_bytes())?,
                }
                out.write_all(b"\t")?;
                out.write_all(record.command.as_encoded_bytes())?;
                out.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ConfigView<'a> {
    host_compiler: &'a str,
    results_path: &'a Path,
    host_compiler_from_env: bool,
    results_path_from_env: bool,
}

fn print_config(format: OutputFormat) -> Result<()> {
    let config = baked_config();
    let (host_compiler_from_env, results_path_from_env) = baked_from_env();
    let view = ConfigView {
        host_compiler: config.host_compiler(),
        results_path: config.results_path(),
        host_compiler_from_env,
        results_path_from_env,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Plain => {
            println!("host compiler: {}", view.host_compiler);
            println!("results file:  {}", view.results_path.display());
            if !host_compiler_from_env || !results_path_from_env {
                println!("(defaults in use; set CCTRAP_HOST_COMPILER / CCTRAP_RESULTS_FILE when building)");
            }
        }
    }
    Ok(())
}
