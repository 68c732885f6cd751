//! Durable mirror of the conversation history.
//!
//! The in-memory turn list owned by the session is the source of truth; the
//! sink only mirrors appends so a conversation can be inspected after the
//! process exits. A sink failure must never abort a turn.

use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use konsul_core::ChatTurn;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Receives every turn appended to the session history.
pub trait HistorySink {
    fn append(&mut self, turn: &ChatTurn) -> Result<(), HistoryError>;
}

/// Discards everything. Used when no history path is configured.
pub struct NullSink;

impl HistorySink for NullSink {
    fn append(&mut self, _turn: &ChatTurn) -> Result<(), HistoryError> {
        Ok(())
    }
}

/// One mirrored line: the turn plus the append timestamp.
#[derive(Debug, Serialize)]
struct HistoryLine<'a> {
    #[serde(flatten)]
    turn: &'a ChatTurn,
    at: DateTime<Utc>,
}

/// Append-only JSONL file, one turn per line.
pub struct JsonlHistory {
    path: PathBuf,
    file: File,
}

impl JsonlHistory {
    /// Open (or create) the mirror file for appending.
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySink for JsonlHistory {
    fn append(&mut self, turn: &ChatTurn) -> Result<(), HistoryError> {
        let line = HistoryLine {
            turn,
            at: Utc::now(),
        };
        let mut encoded = serde_json::to_string(&line)?;
        encoded.push('\n');
        self.file.write_all(encoded.as_bytes())?;
        Ok(())
    }
}
