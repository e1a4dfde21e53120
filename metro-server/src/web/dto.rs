//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Line, Station, StationOrder};
use crate::network::TransitGraph;
use crate::planner::{Interchange, Route, RouteMode, RouteSegment};
use crate::stations::{FuzzyMatch, Resolution};

/// Query with free-text station input.
#[derive(Debug, Deserialize)]
pub struct StationQuery {
    /// Text typed by the user
    pub q: String,

    /// Maximum number of results (capped at 50)
    pub limit: Option<usize>,
}

/// Outcome of resolving a station name.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    /// The input as given
    pub query: String,

    /// Whether a station was found
    pub matched: bool,

    /// The station found, if any
    pub canonical_name: Option<String>,

    /// True if the station came from fuzzy matching
    pub was_suggestion: bool,
}

impl ResolveResponse {
    /// Create from a resolution of `query`.
    pub fn from_resolution(query: &str, resolution: &Resolution) -> Self {
        Self {
            query: query.to_string(),
            matched: resolution.matched(),
            canonical_name: resolution.canonical_name().map(str::to_string),
            was_suggestion: resolution.was_suggestion(),
        }
    }
}

/// A scored station in search results.
#[derive(Debug, Serialize)]
pub struct StationMatchResult {
    /// Station name
    pub name: String,

    /// Similarity, 0.0 to 1.0
    pub score: f64,
}

impl From<FuzzyMatch> for StationMatchResult {
    fn from(m: FuzzyMatch) -> Self {
        Self {
            name: m.name,
            score: m.score,
        }
    }
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    /// Matching stations, best first
    pub stations: Vec<StationMatchResult>,
}

/// Response for autocomplete.
#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    /// Suggested station names
    pub suggestions: Vec<String>,
}

/// Query for stations near a point.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,

    /// Search radius in kilometres (defaults to 1.0)
    pub radius_km: Option<f64>,

    /// Maximum number of results (capped at 50)
    pub limit: Option<usize>,
}

/// A station near the queried point.
#[derive(Debug, Serialize)]
pub struct NearbyResult {
    /// Station name
    pub name: String,

    /// Distance from the queried point
    pub distance_km: f64,

    /// Lines serving the station
    pub lines: Vec<String>,
}

/// Response for nearby stations.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    /// Stations, nearest first
    pub stations: Vec<NearbyResult>,
}

/// A geographic position.
#[derive(Debug, Serialize)]
pub struct CoordinateResult {
    pub lat: f64,
    pub lon: f64,
}

/// A directly connected station.
#[derive(Debug, Serialize)]
pub struct NeighbourResult {
    /// Station name
    pub name: String,

    /// Edge weight (km when both ends are located, otherwise 1.0)
    pub weight: f64,
}

/// Details of a single station.
#[derive(Debug, Serialize)]
pub struct StationInfo {
    /// Canonical station name
    pub name: String,

    /// Line ids serving the station
    pub lines: Vec<String>,

    /// Whether more than one line serves the station
    pub is_interchange: bool,

    /// Location, if known
    pub coordinate: Option<CoordinateResult>,

    /// Adjacent stations
    pub neighbours: Vec<NeighbourResult>,
}

impl StationInfo {
    /// Create from a station in `graph`.
    pub fn from_station(graph: &TransitGraph, station: &Station) -> Self {
        Self {
            name: station.name().to_string(),
            lines: station.lines().iter().map(|l| l.to_string()).collect(),
            is_interchange: station.is_interchange(),
            coordinate: station.coordinate().map(|c| CoordinateResult {
                lat: c.lat(),
                lon: c.lon(),
            }),
            neighbours: graph
                .neighbors(station.name())
                .into_iter()
                .map(|(name, weight)| NeighbourResult {
                    name: name.to_string(),
                    weight,
                })
                .collect(),
        }
    }
}

/// A line in the line list.
#[derive(Debug, Serialize)]
pub struct LineSummary {
    /// Canonical line id
    pub id: String,

    /// Display name
    pub name: String,

    /// Whether stations are listed in running order
    pub order: StationOrder,

    /// Number of stations listed
    pub station_count: usize,
}

impl LineSummary {
    /// Create from a domain Line.
    pub fn from_line(line: &Line) -> Self {
        Self {
            id: line.id().to_string(),
            name: line.name().to_string(),
            order: line.order(),
            station_count: line.stations().len(),
        }
    }
}

/// Response for the line list.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    /// Lines sorted by id
    pub lines: Vec<LineSummary>,
}

/// Details of a single line.
#[derive(Debug, Serialize)]
pub struct LineDetail {
    /// Canonical line id
    pub id: String,

    /// Display name
    pub name: String,

    /// Whether stations are listed in running order
    pub order: StationOrder,

    /// Stations as listed
    pub stations: Vec<String>,
}

impl LineDetail {
    /// Create from a domain Line.
    pub fn from_line(line: &Line) -> Self {
        Self {
            id: line.id().to_string(),
            name: line.name().to_string(),
            order: line.order(),
            stations: line.stations().to_vec(),
        }
    }
}

/// Request to plan a route.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    /// Origin station, free text
    pub from: String,

    /// Destination station, free text
    pub to: String,

    /// What to optimise for (defaults to fewest hops)
    #[serde(default)]
    pub mode: RouteMode,
}

/// A single-line stretch of a route.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    /// Line id
    pub line: String,

    /// Line display name
    pub line_name: String,

    /// Boarding station
    pub start: String,

    /// Alighting station
    pub end: String,

    /// Stations covered, both ends included
    pub stations: Vec<String>,

    /// Number of stops travelled
    pub stops: usize,
}

impl SegmentResult {
    /// Create from a domain RouteSegment.
    pub fn from_segment(segment: &RouteSegment) -> Self {
        Self {
            line: segment.line().to_string(),
            line_name: segment.line_name().to_string(),
            start: segment.start().to_string(),
            end: segment.end().to_string(),
            stations: segment.stations().to_vec(),
            stops: segment.stop_count(),
        }
    }
}

/// A change of line.
#[derive(Debug, Serialize)]
pub struct InterchangeResult {
    /// Where the change happens
    pub station: String,

    /// Line id being left
    pub from_line: String,

    /// Line id being joined
    pub to_line: String,

    /// Human-readable instruction
    pub instruction: String,
}

impl InterchangeResult {
    /// Create from a domain Interchange.
    pub fn from_interchange(interchange: &Interchange) -> Self {
        Self {
            station: interchange.station.clone(),
            from_line: interchange.from_line.to_string(),
            to_line: interchange.to_line.to_string(),
            instruction: interchange.instruction(),
        }
    }
}

/// A planned route.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Stations from origin to destination
    pub stations: Vec<String>,

    /// Number of stations, both ends included
    pub station_count: usize,

    /// Number of hops
    pub hops: usize,

    /// Sum of edge weights
    pub distance: f64,

    /// Single-line stretches
    pub segments: Vec<SegmentResult>,

    /// Changes of line
    pub interchanges: Vec<InterchangeResult>,

    /// Fare in rupees
    pub fare: u32,

    /// Estimated time on board
    pub estimated_minutes: f64,
}

impl RouteResult {
    /// Create from a domain Route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            stations: route.path().stations().to_vec(),
            station_count: route.station_count(),
            hops: route.hop_count(),
            distance: route.distance(),
            segments: route.segments().iter().map(SegmentResult::from_segment).collect(),
            interchanges: route
                .interchanges()
                .iter()
                .map(InterchangeResult::from_interchange)
                .collect(),
            fare: route.fare().rupees(),
            estimated_minutes: route.travel_time().num_seconds() as f64 / 60.0,
        }
    }
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    /// How the origin was resolved
    pub from: ResolveResponse,

    /// How the destination was resolved
    pub to: ResolveResponse,

    /// What the route optimises for
    pub mode: RouteMode,

    /// The best route
    pub route: RouteResult,

    /// Other routes, shortest first
    pub alternates: Vec<RouteResult>,
}

/// Query for reachability between two stations.
#[derive(Debug, Deserialize)]
pub struct ReachabilityQuery {
    pub from: String,
    pub to: String,
}

/// Response for reachability.
#[derive(Debug, Serialize)]
pub struct ReachabilityResponse {
    /// Canonical origin name
    pub from: String,

    /// Canonical destination name
    pub to: String,

    /// Whether any path joins the two
    pub reachable: bool,

    /// A station both can reach with the fewest expansion rounds
    pub nearest_common_station: Option<String>,

    /// Lines serving both stations directly
    pub direct_lines: Vec<String>,
}

/// Response for a network reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    /// Stations in the new network
    pub stations: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
