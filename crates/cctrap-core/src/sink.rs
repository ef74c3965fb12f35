use crate::Result;
use crate::record::ResultRecord;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination for result records.
pub trait ResultSink {
    fn append(&mut self, record: &ResultRecord) -> Result<()>;
}

/// Appends records to a plain-text results file shared by every trap
/// invocation of a build.
///
/// The file is opened per record and closed before `append` returns. Each
/// record goes out in a single write so that parallel compilers appending to
/// the same file do not split one another's lines on local filesystems. No
/// cross-process lock is taken.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for FileSink {
    fn append(&mut self, record: &ResultRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&record.to_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Vec<ResultRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// Everything appended so far, byte for byte as a results file would hold it.
    pub fn contents(&self) -> Vec<u8> {
        self.records.iter().flat_map(ResultRecord::to_bytes).collect()
    }
}

impl ResultSink for MemorySink {
    fn append(&mut self, record: &ResultRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn append(&mut self, record: &ResultRecord) -> Result<()> {
        (**self).append(record)
    }
}
