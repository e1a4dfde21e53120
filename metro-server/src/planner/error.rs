//! Routing errors.

/// Errors from path validation, segmentation and route planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// No station has this name.
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Both stations exist but no path joins them.
    #[error("no route from {from} to {to}")]
    Unreachable { from: String, to: String },

    /// Two consecutive path stations share no line.
    #[error("no line connects {from} and {to}")]
    NoConnectingLine { from: String, to: String },

    /// Two consecutive path stations are not joined by an edge.
    #[error("{from} and {to} are not adjacent")]
    NotAdjacent { from: String, to: String },

    /// A path must contain at least one station.
    #[error("path is empty")]
    EmptyPath,
}
