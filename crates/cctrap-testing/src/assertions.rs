//! Custom assertions over results logs.

use anyhow::{Context, Result};
use cctrap_core::{ResultRecord, parse_results};
use std::ffi::OsStr;

/// Assert that the log holds exactly `expected` records and return them.
pub fn assert_record_count(log: impl AsRef<[u8]>, expected: usize) -> Result<Vec<ResultRecord>> {
    let records = parse_results(log).context("Results log did not parse")?;

    if records.len() != expected {
        anyhow::bail!("Expected {} records, got {}", expected, records.len());
    }

    Ok(records)
}

/// Assert the first line of the log's only record.
pub fn assert_single_source(log: impl AsRef<[u8]>, expected: Option<&str>) -> Result<ResultRecord> {
    let mut records = assert_record_count(log, 1)?;
    let record = records.remove(0);

    if record.source_file() != expected.map(OsStr::new) {
        anyhow::bail!(
            "Expected source {:?}, got {:?}",
            expected,
            record.source_file()
        );
    }

    Ok(record)
}
