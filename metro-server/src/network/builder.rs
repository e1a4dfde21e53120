//! Two-phase graph construction.
//!
//! Phase one canonicalises names and collects which lines each station
//! belongs to, registering every station as a vertex. Phase two derives
//! edges from line adjacency. Keeping the phases apart means edges are
//! only ever added between stations that already exist.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, info, warn};

use crate::domain::{
    Coordinate, DomainError, Line, LineId, Station, StationOrder, normalize_station_name,
};

use super::definition::NetworkDefinition;
use super::error::BuildError;
use super::graph::{TransitGraph, VertexId};

/// Number of nearest neighbours each station is joined to on an
/// unordered line.
const INFERRED_NEIGHBOURS: usize = 2;

/// Smallest edge weight; stations sharing a coordinate are still one
/// metre apart.
const MIN_WEIGHT_KM: f64 = 0.001;

/// Station memberships collected in phase one.
struct Memberships {
    names: Vec<String>,
    index: HashMap<String, VertexId>,
    lines_of: Vec<BTreeSet<LineId>>,
    coordinates: Vec<Option<Coordinate>>,
    /// Lines in definition order, with station vertex ids.
    lines: Vec<(Line, Vec<VertexId>)>,
}

impl Memberships {
    fn register(&mut self, name: String, line: &LineId) -> VertexId {
        let id = match self.index.get(&name) {
            Some(&id) => id,
            None => {
                let id = self.names.len();
                self.index.insert(name.clone(), id);
                self.names.push(name);
                self.lines_of.push(BTreeSet::new());
                self.coordinates.push(None);
                id
            }
        };
        self.lines_of[id].insert(line.clone());
        id
    }
}

/// Build a transit graph from a network definition.
///
/// Building is deterministic: the same definition always produces the
/// same vertices, edges and weights.
///
/// # Errors
///
/// Returns `Err` if a line id is invalid or duplicated, a line lists an
/// empty station name, or a coordinate is out of range.
pub fn build_graph(definition: &NetworkDefinition) -> Result<TransitGraph, BuildError> {
    let memberships = collect_memberships(definition)?;
    let graph = connect(memberships);

    info!(
        stations = graph.station_count(),
        edges = graph.edge_count(),
        lines = graph.lines().count(),
        "Built transit graph"
    );

    Ok(graph)
}

/// Phase one: register every station and the lines it belongs to.
fn collect_memberships(definition: &NetworkDefinition) -> Result<Memberships, BuildError> {
    let mut m = Memberships {
        names: Vec::new(),
        index: HashMap::new(),
        lines_of: Vec::new(),
        coordinates: Vec::new(),
        lines: Vec::with_capacity(definition.lines.len()),
    };
    let mut seen_lines = BTreeSet::new();

    for line_def in &definition.lines {
        let id = LineId::parse(&line_def.id).map_err(|source| BuildError::InvalidLineId {
            raw: line_def.id.clone(),
            source,
        })?;
        if !seen_lines.insert(id.clone()) {
            return Err(BuildError::DuplicateLine(id));
        }

        let mut names = Vec::with_capacity(line_def.stations.len());
        let mut ids = Vec::with_capacity(line_def.stations.len());
        for (position, raw) in line_def.stations.iter().enumerate() {
            let name = normalize_station_name(raw);
            if name.is_empty() {
                return Err(BuildError::InvalidStation {
                    line: id,
                    position,
                    source: DomainError::EmptyStationName,
                });
            }
            ids.push(m.register(name.clone(), &id));
            names.push(name);
        }

        let display = line_def
            .name
            .clone()
            .unwrap_or_else(|| id.default_display_name());
        m.lines.push((Line::new(id, display, names, line_def.order), ids));
    }

    for (raw, coord) in &definition.coordinates {
        let name = normalize_station_name(raw);
        let coordinate = Coordinate::new(coord.lat, coord.lon).map_err(|source| {
            BuildError::InvalidCoordinate {
                station: name.clone(),
                source,
            }
        })?;

        match m.index.get(&name) {
            Some(&id) => match m.coordinates[id] {
                Some(existing) if existing != coordinate => {
                    warn!(station = %name, "Conflicting coordinates, keeping the first");
                }
                Some(_) => {}
                None => m.coordinates[id] = Some(coordinate),
            },
            None => warn!(station = %name, "Coordinate given for a station on no line"),
        }
    }

    Ok(m)
}

/// Phase two: derive edges from line adjacency.
///
/// Sequence adjacency is applied for every line before any distance
/// inference, so an inferred edge never replaces a sequence edge. An
/// unordered line only replaces listed adjacency where both ends are
/// located and the line has at least two located stations; everywhere
/// else its listed order still joins neighbours.
fn connect(m: Memberships) -> TransitGraph {
    let mut adjacency: Vec<Vec<(VertexId, f64)>> = vec![Vec::new(); m.names.len()];

    for (line, ids) in &m.lines {
        let infers = line.order() == StationOrder::Unordered
            && located_stations(ids, &m.coordinates).len() >= 2;
        for pair in ids.windows(2) {
            let located = m.coordinates[pair[0]].is_some() && m.coordinates[pair[1]].is_some();
            if !infers || !located {
                add_edge(&mut adjacency, &m.coordinates, pair[0], pair[1]);
            }
        }
    }

    for (line, ids) in &m.lines {
        if line.order() != StationOrder::Unordered {
            continue;
        }
        infer_edges(&mut adjacency, &m.coordinates, line, ids);
    }

    let stations = m
        .names
        .into_iter()
        .zip(m.lines_of)
        .zip(m.coordinates)
        .map(|((name, lines), coordinate)| Station::new(name, lines, coordinate))
        .collect();

    let lines: BTreeMap<LineId, Line> = m
        .lines
        .into_iter()
        .map(|(line, _)| (line.id().clone(), line))
        .collect();

    TransitGraph::from_parts(stations, adjacency, lines)
}

/// Distinct stations on a line that have a coordinate, in listed order.
fn located_stations(
    ids: &[VertexId],
    coordinates: &[Option<Coordinate>],
) -> Vec<(VertexId, Coordinate)> {
    let mut seen = BTreeSet::new();
    ids.iter()
        .filter(|&&id| seen.insert(id))
        .filter_map(|&id| coordinates[id].map(|c| (id, c)))
        .collect()
}

/// Join each located station on an unordered line to its nearest peers.
fn infer_edges(
    adjacency: &mut [Vec<(VertexId, f64)>],
    coordinates: &[Option<Coordinate>],
    line: &Line,
    ids: &[VertexId],
) {
    let located = located_stations(ids, coordinates);
    if located.len() < 2 {
        debug!(line = %line.id(), "Too few located stations, keeping listed adjacency");
        return;
    }

    for &(id, coord) in &located {
        let mut nearest: Vec<(f64, VertexId)> = located
            .iter()
            .filter(|(other, _)| *other != id)
            .map(|(other, c)| (coord.haversine_km(c), *other))
            .collect();
        nearest.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        for &(_, other) in nearest.iter().take(INFERRED_NEIGHBOURS) {
            add_edge(adjacency, coordinates, id, other);
        }
    }
}

/// Add an undirected edge unless the pair is already joined.
///
/// The weight is fixed by whichever line adds the pair first.
fn add_edge(
    adjacency: &mut [Vec<(VertexId, f64)>],
    coordinates: &[Option<Coordinate>],
    a: VertexId,
    b: VertexId,
) {
    if a == b || adjacency[a].iter().any(|(n, _)| *n == b) {
        return;
    }
    let weight = edge_weight(coordinates[a], coordinates[b]);
    adjacency[a].push((b, weight));
    adjacency[b].push((a, weight));
}

/// One hop, or the great-circle distance when both ends are located.
fn edge_weight(a: Option<Coordinate>, b: Option<Coordinate>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => a.haversine_km(&b).max(MIN_WEIGHT_KM),
        _ => 1.0,
    }
}
