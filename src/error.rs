//! Error types for table loading and snapshot persistence.
//!
//! Encoding and decoding never fail; only building the engine does.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the Morse table or the Pinyin dictionary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A data source or config file is not valid JSON, or has the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The compiled snapshot could not be written or read back.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    /// The snapshot was built from different versions of the source files.
    #[error("snapshot {0} is out of date with its sources")]
    StaleSnapshot(PathBuf),

    /// A Morse table entry is malformed.
    #[error("invalid Morse entry {symbol:?} => {pattern:?}: {reason}")]
    InvalidMorseEntry {
        symbol: String,
        pattern: String,
        reason: &'static str,
    },

    /// Two symbols share one pattern, or one symbol appears twice.
    #[error("Morse table is not one-to-one: {0:?} is mapped more than once")]
    DuplicateMorse(String),

    /// A table loaded successfully but holds no usable entries.
    #[error("{0} is empty")]
    EmptyTable(&'static str),
}

/// A convenience `Result` type alias using the crate's `EngineError` type.
pub type Result<T> = std::result::Result<T, EngineError>;
