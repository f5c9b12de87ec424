// src/sink/mod.rs
// =============================================================================
// The result sink: an append-only record of what the crawl did.
//
// Per round the controller writes, in this order:
//   1. a depth marker, before any fetch of the round starts
//   2. the processed batch, once every URL of the round was attempted
//   3. the links found during the round
//
// Submodules:
// - file: JSON Lines file implementation used by the binary
// - memory: in-memory implementation for tests
// =============================================================================

mod file;
#[cfg(test)]
pub mod memory;

pub use file::FileSink;

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

use crate::links::LinkSet;

/// One line of the results file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkRecord {
    DepthMarker { depth_remaining: usize },
    ProcessedBatch { depth_remaining: usize, urls: Vec<String> },
    FoundLinks { links: Vec<String> },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot write results to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot encode result record: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait ResultSink: Send {
    /// Appends and flushes a single record
    fn append(&mut self, record: SinkRecord) -> impl Future<Output = Result<(), SinkError>> + Send;

    /// Where the records end up (a file path for FileSink)
    fn destination(&self) -> String;

    fn write_depth_marker(
        &mut self,
        depth_remaining: usize,
    ) -> impl Future<Output = Result<(), SinkError>> + Send {
        self.append(SinkRecord::DepthMarker { depth_remaining })
    }

    fn write_processed_batch(
        &mut self,
        urls: &[Url],
        depth_remaining: usize,
    ) -> impl Future<Output = Result<(), SinkError>> + Send {
        let urls = urls.iter().map(Url::to_string).collect();
        self.append(SinkRecord::ProcessedBatch {
            depth_remaining,
            urls,
        })
    }

    fn write_found_links(
        &mut self,
        links: &LinkSet,
    ) -> impl Future<Output = Result<(), SinkError>> + Send {
        let links = links.iter().map(Url::to_string).collect();
        self.append(SinkRecord::FoundLinks { links })
    }
}
