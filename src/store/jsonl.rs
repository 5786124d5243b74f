//! Append-only newline-delimited JSON log.
//!
//! Both persistent stores (history, utilization) sit on this one interface so
//! the storage medium can change without touching validators or the
//! recommendation engine. Appends take an exclusive advisory lock and write
//! the whole record plus terminator in one call, so the only partial-write
//! outcome is a truncated final line — which the tolerant reader skips.

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::PathBuf;

pub struct JsonlLog<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonlLog<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one record as a single line. Creates parent directories on
    /// first use. Prior records are never rewritten.
    pub fn append(&self, record: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut line = serde_json::to_string(record).context("Failed to serialize log record")?;
        line.push('\n');

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log: {}", self.path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock log: {}", self.path.display()))?;
        (&file)
            .write_all(line.as_bytes())
            .with_context(|| format!("Failed to append to log: {}", self.path.display()))?;
        Ok(())
    }

    /// Read every parseable record in file order. A missing file reads as
    /// empty; corrupt lines are skipped, never fatal.
    pub fn read_all(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read log: {}", self.path.display()))?;

        let mut records = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::debug!(path = %self.path.display(), %err, "skipping corrupt log line");
                }
            }
        }
        Ok(records)
    }

    /// The most recent `n` records, oldest first.
    pub fn read_last(&self, n: usize) -> Result<Vec<T>> {
        let mut records = self.read_all()?;
        let skip = records.len().saturating_sub(n);
        Ok(records.split_off(skip))
    }
}
