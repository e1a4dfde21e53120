//! The transit graph and how it is built.
//!
//! Line definitions are turned into an immutable [`TransitGraph`] by a
//! two-phase build: station memberships are collected first, then edges
//! are derived from line adjacency. A [`NetworkHandle`] holds the graph
//! currently in use and swaps in a new one on reload.

mod builder;
mod definition;
mod error;
mod graph;
mod handle;

pub use builder::build_graph;
pub use definition::{CoordinateDefinition, LineDefinition, NetworkDefinition};
pub use error::{BuildError, LoadError};
pub use graph::TransitGraph;
pub use handle::NetworkHandle;

pub(crate) use graph::VertexId;
