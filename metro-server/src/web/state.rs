//! Application state for the web layer.

use std::sync::Arc;

use crate::network::NetworkHandle;
use crate::planner::PlannerConfig;
use crate::stations::ResolverConfig;

/// Shared application state.
///
/// Handlers take a graph snapshot per request, so a reload never changes
/// the network under a request in flight.
#[derive(Clone)]
pub struct AppState {
    /// Current transit network
    pub network: Arc<NetworkHandle>,

    /// Route planner configuration
    pub planner: Arc<PlannerConfig>,

    /// Station name resolution configuration
    pub resolver: Arc<ResolverConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: NetworkHandle, planner: PlannerConfig, resolver: ResolverConfig) -> Self {
        Self {
            network: Arc::new(network),
            planner: Arc::new(planner),
            resolver: Arc::new(resolver),
        }
    }
}
