// src/sink/file.rs
// =============================================================================
// Append-only JSON Lines file sink.
//
// The file is opened in create + append mode, so results of earlier crawls
// are never truncated. Every record is serialized to one line, written and
// flushed on its own.
// =============================================================================

use std::path::PathBuf;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::{ResultSink, SinkError, SinkRecord};

#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: File,
}

impl FileSink {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| SinkError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(Self { path, file })
    }

    fn io_error(&self, source: std::io::Error) -> SinkError {
        SinkError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ResultSink for FileSink {
    async fn append(&mut self, record: SinkRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        if let Err(e) = self.file.write_all(line.as_bytes()).await {
            return Err(self.io_error(e));
        }
        if let Err(e) = self.file.flush().await {
            return Err(self.io_error(e));
        }

        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}
