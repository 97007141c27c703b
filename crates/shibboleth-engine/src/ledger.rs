//! The deferred-decision ledger.
//!
//! A durable append-only queue of `(responder, challenge)` pairs whose
//! adaptation is postponed until a concrete verdict lands. The session is
//! the sole reader/writer. Records are consumed only as a whole batch:
//! read, replayed, cleared.
//!
//! Format: one JSON record per line. Each push is flushed immediately so
//! a crash loses at most the judgement in flight, never corrupts the
//! queue.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use shibboleth_core::error::Result;
use shibboleth_core::types::DeferredRecord;

/// Handle to the on-disk ledger file.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// A handle for the given file. The file is created lazily on the
    /// first push; an absent file reads as an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one record and flush it.
    pub fn push(&self, record: &DeferredRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        file.sync_data()?;
        Ok(())
    }

    /// Read every queued record, oldest first.
    pub fn records(&self) -> Result<Vec<DeferredRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }

    /// Read every queued record and clear the queue.
    pub fn take(&self) -> Result<Vec<DeferredRecord>> {
        let records = self.records()?;
        self.clear()?;
        Ok(records)
    }

    /// Empty the queue.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            File::create(&self.path)?;
        }
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.records()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shibboleth_core::types::{Challenge, Word};

    fn record(responder: &str, challenge: &[&str]) -> DeferredRecord {
        DeferredRecord {
            responder: Word::new(responder).unwrap(),
            challenge: Challenge::new(
                challenge.iter().map(|w| Word::new(*w).unwrap()).collect(),
            ),
        }
    }

    #[test]
    fn absent_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::open(dir.path().join("pending.jsonl"));
        assert!(ledger.is_empty().unwrap());
        assert!(ledger.records().unwrap().is_empty());
    }

    #[test]
    fn push_take_roundtrip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::open(dir.path().join("pending.jsonl"));

        let first = record("bird", &["cat", "dog", "fish"]);
        let second = record("owl", &["cat", "dog", "fish"]);
        ledger.push(&first).unwrap();
        ledger.push(&second).unwrap();
        assert_eq!(ledger.len().unwrap(), 2);

        let taken = ledger.take().unwrap();
        assert_eq!(taken, vec![first, second]);
        assert!(ledger.is_empty().unwrap());

        // taking again finds nothing
        assert!(ledger.take().unwrap().is_empty());
    }

    #[test]
    fn records_survive_reopening_the_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pending.jsonl");
        Ledger::open(&path).push(&record("bird", &["cat"])).unwrap();

        let reopened = Ledger::open(&path);
        assert_eq!(reopened.len().unwrap(), 1);
    }
}
