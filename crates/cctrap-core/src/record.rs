use crate::{Error, Result};
use serde::{Serialize, Serializer};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

/// First line of a record whose invocation compiled no source file.
pub const NONE_MARKER: &str = "None";

const RECORD_SEPARATOR: &[u8] = b"\n\n";

/// One intercepted invocation as stored in the results log.
///
/// Rendered as three lines: the source path (or [`NONE_MARKER`]), the full
/// proxy command, and an empty line. Both values keep the exact bytes the
/// build passed; only the `Display` and JSON forms are lossy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    #[serde(serialize_with = "serialize_lossy_opt")]
    pub source_file: Option<OsString>,
    #[serde(serialize_with = "serialize_lossy")]
    pub command: OsString,
}

impl ResultRecord {
    pub fn new(source_file: Option<OsString>, command: impl Into<OsString>) -> Self {
        Self {
            source_file,
            command: command.into(),
        }
    }

    pub fn source_file(&self) -> Option<&OsStr> {
        self.source_file.as_deref()
    }

    /// The record exactly as it is appended to a results file.
    pub fn to_bytes(&self) -> Vec<u8> {
        let source = self
            .source_file
            .as_deref()
            .map_or(NONE_MARKER.as_bytes(), OsStr::as_encoded_bytes);
        let command = self.command.as_encoded_bytes();

        let mut bytes = Vec::with_capacity(source.len() + command.len() + 3);
        bytes.extend_from_slice(source);
        bytes.push(b'\n');
        bytes.extend_from_slice(command);
        bytes.extend_from_slice(RECORD_SEPARATOR);
        bytes
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}

fn serialize_lossy<S: Serializer>(value: &OsString, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string_lossy())
}

fn serialize_lossy_opt<S: Serializer>(
    value: &Option<OsString>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.serialize_some(&value.to_string_lossy()),
        None => serializer.serialize_none(),
    }
}

#[cfg(unix)]
fn os_string_from_bytes(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(bytes).to_os_string()
}

#[cfg(not(unix))]
fn os_string_from_bytes(bytes: &[u8]) -> OsString {
    String::from_utf8_lossy(bytes).into_owned().into()
}

/// Splits `bytes` on every blank-line separator, keeping empty chunks.
fn split_records(bytes: &[u8]) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut rest = bytes;
    while let Some(at) = rest
        .windows(RECORD_SEPARATOR.len())
        .position(|window| window == RECORD_SEPARATOR)
    {
        chunks.push(&rest[..at]);
        rest = &rest[at + RECORD_SEPARATOR.len()..];
    }
    chunks.push(rest);
    chunks
}

/// Parses the contents of a results log back into records.
///
/// Records are separated by a blank line and empty chunks are ignored. A
/// chunk without a command line is rejected with the line it starts on.
pub fn parse_results(contents: impl AsRef<[u8]>) -> Result<Vec<ResultRecord>> {
    let mut records = Vec::new();
    let mut line = 1;

    for chunk in split_records(contents.as_ref()) {
        let start_line = line;
        line += chunk.iter().filter(|&&b| b == b'\n').count() + 2;

        if chunk.is_empty() {
            continue;
        }

        let mut lines = chunk.split(|&b| b == b'\n');
        let source = lines.next().unwrap_or_default();
        let command = lines.next().ok_or_else(|| Error::Parse {
            line: start_line,
            message: format!(
                "record for '{}' has no command line",
                String::from_utf8_lossy(source)
            ),
        })?;

        let source_file = (source != NONE_MARKER.as_bytes()).then(|| os_string_from_bytes(source));
        records.push(ResultRecord::new(source_file, os_string_from_bytes(command)));
    }

    Ok(records)
}

/// Reads and parses a results log from disk.
pub fn read_results(path: &Path) -> Result<Vec<ResultRecord>> {
    let contents = std::fs::read(path)?;
    parse_results(contents)
}

/// Source files compiled during the build, in log order.
pub fn source_files(records: &[ResultRecord]) -> Vec<&OsStr> {
    records.iter().filter_map(ResultRecord::source_file).collect()
}
