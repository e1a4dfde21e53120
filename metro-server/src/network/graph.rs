//! The built transit graph.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{Coordinate, Line, LineId, Station};

/// Dense index of a station within one graph.
pub(crate) type VertexId = usize;

/// An immutable, undirected, weighted station graph.
///
/// Stations are stored in the order they were first seen in the network
/// definition, and each neighbour list keeps edge insertion order, so
/// every traversal over the graph is reproducible.
///
/// # Invariants
///
/// - Every station listed by any line is a vertex
/// - Edges are symmetric: if A→B has weight w, B→A has weight w
/// - Edge weights are positive
#[derive(Debug, Clone, PartialEq)]
pub struct TransitGraph {
    stations: Vec<Station>,
    index: HashMap<String, VertexId>,
    lowercase: HashMap<String, VertexId>,
    adjacency: Vec<Vec<(VertexId, f64)>>,
    lines: BTreeMap<LineId, Line>,
}

impl TransitGraph {
    pub(super) fn from_parts(
        stations: Vec<Station>,
        adjacency: Vec<Vec<(VertexId, f64)>>,
        lines: BTreeMap<LineId, Line>,
    ) -> Self {
        let index = stations
            .iter()
            .enumerate()
            .map(|(id, s)| (s.name().to_string(), id))
            .collect();

        let mut lowercase = HashMap::with_capacity(stations.len());
        for (id, station) in stations.iter().enumerate() {
            lowercase.entry(station.name().to_lowercase()).or_insert(id);
        }

        Self {
            stations,
            index,
            lowercase,
            adjacency,
            lines,
        }
    }

    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Returns true if the graph has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All stations, in first-seen order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// All station names, in first-seen order.
    pub fn station_names(&self) -> impl Iterator<Item = &str> {
        self.stations.iter().map(Station::name)
    }

    /// Look up a station by its canonical name.
    pub fn station(&self, name: &str) -> Option<&Station> {
        self.index.get(name).map(|&id| &self.stations[id])
    }

    /// Look up a station ignoring case.
    pub fn station_ignore_case(&self, name: &str) -> Option<&Station> {
        self.lowercase
            .get(&name.to_lowercase())
            .map(|&id| &self.stations[id])
    }

    /// Returns true if `name` is a station in this graph.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All lines, sorted by id.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    /// Look up a line by id.
    pub fn line(&self, id: &LineId) -> Option<&Line> {
        self.lines.get(id)
    }

    /// Lines serving both stations, sorted by id.
    pub fn common_lines(&self, a: &str, b: &str) -> Vec<&Line> {
        let (Some(a), Some(b)) = (self.station(a), self.station(b)) else {
            return Vec::new();
        };
        a.lines()
            .intersection(b.lines())
            .filter_map(|id| self.lines.get(id))
            .collect()
    }

    /// Adjacent stations and edge weights, in edge insertion order.
    pub fn neighbors(&self, name: &str) -> Vec<(&str, f64)> {
        match self.vertex(name) {
            Some(id) => self.adjacency[id]
                .iter()
                .map(|&(n, w)| (self.name_of(n), w))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Weight of the edge between two stations, if they are adjacent.
    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        let a = self.vertex(a)?;
        let b = self.vertex(b)?;
        self.adjacency[a]
            .iter()
            .find(|(n, _)| *n == b)
            .map(|&(_, w)| w)
    }

    /// Stations with a known location within `radius_km` of `point`,
    /// nearest first.
    pub fn nearby(&self, point: Coordinate, radius_km: f64) -> Vec<(f64, &Station)> {
        let mut found: Vec<(f64, &Station)> = self
            .stations
            .iter()
            .filter_map(|s| {
                let d = s.coordinate()?.haversine_km(&point);
                (d <= radius_km).then_some((d, s))
            })
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.name().cmp(b.1.name())));
        found
    }

    pub(crate) fn vertex(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    pub(crate) fn name_of(&self, id: VertexId) -> &str {
        self.stations[id].name()
    }

    pub(crate) fn neighbors_of(&self, id: VertexId) -> &[(VertexId, f64)] {
        &self.adjacency[id]
    }
}
