//! Network build and load error types.

use std::path::PathBuf;

use crate::domain::{DomainError, InvalidLineId, LineId};

/// Defects in a network definition, detected while building the graph.
///
/// These are data problems, not query-time conditions: a definition that
/// produces one of these never yields a graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// A line id could not be canonicalised
    #[error("invalid line id {raw:?}: {source}")]
    InvalidLineId {
        raw: String,
        #[source]
        source: InvalidLineId,
    },

    /// Two line definitions canonicalise to the same id
    #[error("line {0} is defined more than once")]
    DuplicateLine(LineId),

    /// A line lists a station whose name is empty
    #[error("line {line} has an invalid station at position {position}: {source}")]
    InvalidStation {
        line: LineId,
        position: usize,
        #[source]
        source: DomainError,
    },

    /// A station coordinate is out of range
    #[error("invalid coordinate for {station}: {source}")]
    InvalidCoordinate {
        station: String,
        #[source]
        source: DomainError,
    },
}

/// Errors from loading a network definition file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read network definition {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid definition
    #[error("invalid network definition JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition was read but describes an inconsistent network
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Reload requested on a network that was not loaded from a file
    #[error("network was not loaded from a file")]
    NoSource,

    /// The background reload task panicked or was cancelled
    #[error("network reload task failed: {0}")]
    Interrupted(String),
}
