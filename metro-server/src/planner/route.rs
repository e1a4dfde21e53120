//! Route planning: search plus segmentation.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Fare;
use crate::network::TransitGraph;

use super::config::PlannerConfig;
use super::error::RouteError;
use super::path::Path;
use super::segment::{Interchange, RouteSegment, interchanges};

/// What a route optimises for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMode {
    /// Fewest station-to-station hops.
    #[default]
    FewestHops,
    /// Smallest total edge weight.
    ShortestDistance,
}

/// A planned journey.
#[derive(Debug, Clone)]
pub struct Route {
    path: Path,
    mode: RouteMode,
    distance: f64,
    segments: Vec<RouteSegment>,
    interchanges: Vec<Interchange>,
    fare: Fare,
    travel_time: Duration,
}

impl Route {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> RouteMode {
        self.mode
    }

    /// Sum of edge weights along the path.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    pub fn interchanges(&self) -> &[Interchange] {
        &self.interchanges
    }

    pub fn fare(&self) -> Fare {
        self.fare
    }

    /// Estimated time on board.
    pub fn travel_time(&self) -> Duration {
        self.travel_time
    }

    pub fn station_count(&self) -> usize {
        self.path.station_count()
    }

    pub fn hop_count(&self) -> usize {
        self.path.hop_count()
    }
}

/// Route planner over one graph snapshot.
pub struct Planner<'a> {
    graph: &'a TransitGraph,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a TransitGraph, config: &'a PlannerConfig) -> Self {
        Self { graph, config }
    }

    /// Plan a route between two canonical station names.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a station is unknown, the stations are not
    /// connected, or a hop cannot be assigned to a line.
    pub fn plan(&self, from: &str, to: &str, mode: RouteMode) -> Result<Route, RouteError> {
        for name in [from, to] {
            if !self.graph.contains(name) {
                return Err(RouteError::UnknownStation(name.to_string()));
            }
        }
        let unreachable = || RouteError::Unreachable {
            from: from.to_string(),
            to: to.to_string(),
        };

        let (distance, path) = match mode {
            RouteMode::FewestHops => {
                let path = self
                    .graph
                    .find_fewest_hops_path(from, to)
                    .ok_or_else(unreachable)?;
                (path.weight(self.graph), path)
            }
            RouteMode::ShortestDistance => self
                .graph
                .find_shortest_weighted_path(from, to)
                .ok_or_else(unreachable)?,
        };

        let route = self.route_along(path, mode, distance)?;
        debug!(
            from,
            to,
            ?mode,
            stations = route.station_count(),
            interchanges = route.interchanges().len(),
            "Planned route"
        );
        Ok(route)
    }

    /// Other routes between the same stations, shortest first.
    ///
    /// Paths are enumerated up to the configured maximum length and the
    /// route's own path is excluded. Fewest-hops routes rank alternates by
    /// station count, shortest-distance routes by total weight. At most
    /// the configured number of alternates is returned.
    pub fn alternates(&self, route: &Route) -> Result<Vec<Route>, RouteError> {
        if route.path().is_trivial() || self.config.max_alternates == 0 {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<(f64, Path)> = self
            .graph
            .enumerate_alternate_paths(
                route.path().source(),
                route.path().destination(),
                self.config.max_alternate_length,
            )
            .into_iter()
            .filter(|p| p != route.path())
            .map(|p| (p.weight(self.graph), p))
            .collect();
        match route.mode() {
            RouteMode::FewestHops => candidates.sort_by_key(|(_, p)| p.station_count()),
            RouteMode::ShortestDistance => candidates.sort_by(|a, b| a.0.total_cmp(&b.0)),
        }
        candidates.truncate(self.config.max_alternates);

        candidates
            .into_iter()
            .map(|(distance, path)| self.route_along(path, route.mode(), distance))
            .collect()
    }

    fn route_along(&self, path: Path, mode: RouteMode, distance: f64) -> Result<Route, RouteError> {
        let segments = self.graph.segment_route(&path)?;
        let interchanges = interchanges(&segments);
        Ok(Route {
            fare: Fare::for_stations(path.station_count()),
            travel_time: self.config.travel_time(path.hop_count()),
            path,
            mode,
            distance,
            segments,
            interchanges,
        })
    }
}
