//! Shared handle to the current network snapshot.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::builder::build_graph;
use super::definition::NetworkDefinition;
use super::error::{BuildError, LoadError};
use super::graph::TransitGraph;

/// Thread-safe holder of the graph used by incoming queries.
///
/// Queries take a [`snapshot`](Self::snapshot) and run against it without
/// further locking. A rebuild constructs the new graph completely before
/// swapping it in, so no query sees a partially built graph and queries
/// already running keep the snapshot they started with.
#[derive(Debug)]
pub struct NetworkHandle {
    current: RwLock<Arc<TransitGraph>>,
    source: Option<PathBuf>,
}

impl NetworkHandle {
    /// Wrap an already built graph.
    pub fn new(graph: TransitGraph) -> Self {
        Self {
            current: RwLock::new(Arc::new(graph)),
            source: None,
        }
    }

    /// Load and build a network from a definition file.
    ///
    /// The path is remembered so the network can be [`reload`](Self::reload)ed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let definition = NetworkDefinition::load(path)?;
        let graph = build_graph(&definition)?;
        Ok(Self {
            current: RwLock::new(Arc::new(graph)),
            source: Some(path.to_path_buf()),
        })
    }

    /// The graph to use for a query.
    pub fn snapshot(&self) -> Arc<TransitGraph> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in a new graph, returning the previous one.
    pub fn replace(&self, graph: TransitGraph) -> Arc<TransitGraph> {
        let next = Arc::new(graph);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Build a graph from `definition` and swap it in.
    ///
    /// On failure the current graph is kept and the error is returned.
    /// Returns the new station count.
    pub fn rebuild(&self, definition: &NetworkDefinition) -> Result<usize, BuildError> {
        let graph = build_graph(definition)?;
        let count = graph.station_count();
        self.replace(graph);
        Ok(count)
    }

    /// Re-read the definition file and swap in the rebuilt graph.
    ///
    /// On failure the current graph is kept and the error is returned.
    /// Returns the new station count.
    pub fn reload(&self) -> Result<usize, LoadError> {
        let path = self.source.as_ref().ok_or(LoadError::NoSource)?;
        let definition = NetworkDefinition::load(path)?;
        let count = self.rebuild(&definition)?;
        info!(path = %path.display(), stations = count, "Reloaded network");
        Ok(count)
    }

    /// [`reload`](Self::reload) on the blocking thread pool.
    ///
    /// Reading and building the network is synchronous work; async callers
    /// use this so a reload does not stall a runtime worker.
    pub async fn reload_blocking(self: Arc<Self>) -> Result<usize, LoadError> {
        tokio::task::spawn_blocking(move || self.reload())
            .await
            .map_err(|e| LoadError::Interrupted(e.to_string()))?
    }

    /// The definition file this network was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
