//! Planner configuration.

use chrono::Duration;

/// Configuration parameters for route planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Longest alternate path to enumerate, counted in stations.
    /// Alternate enumeration is exponential in this bound.
    pub max_alternate_length: usize,

    /// Maximum number of alternate routes returned alongside the best one.
    pub max_alternates: usize,

    /// Estimated travel time per hop (seconds).
    pub seconds_per_hop: i64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_alternate_length: usize, max_alternates: usize, seconds_per_hop: i64) -> Self {
        Self {
            max_alternate_length,
            max_alternates,
            seconds_per_hop,
        }
    }

    /// Estimated travel time for a number of hops.
    pub fn travel_time(&self, hops: usize) -> Duration {
        Duration::seconds(self.seconds_per_hop * hops as i64)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_alternate_length: 12,
            max_alternates: 3,
            seconds_per_hop: 90, // 1.5 minutes
        }
    }
}
