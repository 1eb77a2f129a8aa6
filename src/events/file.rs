//! Append-only NDJSON event sink.
//!
//! Each event becomes one JSON object on its own line. The file and its
//! parent directory are created on first use.

use super::{BusEvent, EventSink};
use crate::error::{Result, SockError};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sink that appends events to a local NDJSON file.
#[derive(Debug, Clone)]
pub struct NdjsonEventSink {
    path: PathBuf,
}

impl NdjsonEventSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for NdjsonEventSink {
    fn deliver(&self, event: &BusEvent) -> Result<()> {
        let json_line = serde_json::to_string(event).map_err(|e| {
            SockError::PublishError(format!("failed to serialize event to JSON: {}", e))
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                SockError::PublishError(format!(
                    "failed to create event log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                SockError::PublishError(format!(
                    "failed to open event log '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        writeln!(file, "{}", json_line).map_err(|e| {
            SockError::PublishError(format!(
                "failed to write event to '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
