// src/sink/memory.rs
// =============================================================================
// In-memory sinks for tests: one that keeps every record, one that fails.
// =============================================================================

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{ResultSink, SinkError, SinkRecord};

/// Keeps records in a shared Vec so a test can read them after the crawl
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<SinkRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl ResultSink for MemorySink {
    async fn append(&mut self, record: SinkRecord) -> Result<(), SinkError> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    fn destination(&self) -> String {
        "memory".to_string()
    }
}

/// Accepts `succeed_for` records, then fails every write
#[derive(Debug, Default)]
pub struct FailingSink {
    pub succeed_for: usize,
    written: usize,
}

impl FailingSink {
    pub fn after(succeed_for: usize) -> Self {
        Self {
            succeed_for,
            written: 0,
        }
    }
}

impl ResultSink for FailingSink {
    async fn append(&mut self, _record: SinkRecord) -> Result<(), SinkError> {
        if self.written >= self.succeed_for {
            return Err(SinkError::Io {
                path: PathBuf::from("/dev/full"),
                source: io::Error::other("no space left on device"),
            });
        }
        self.written += 1;
        Ok(())
    }

    fn destination(&self) -> String {
        "/dev/full".to_string()
    }
}
