//! Validated station paths.

use serde::Serialize;

use crate::network::{TransitGraph, VertexId};

use super::error::RouteError;

/// A walk through the graph: one or more stations, each consecutive pair
/// joined by an edge.
///
/// A single-station path means source and destination are the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path {
    stations: Vec<String>,
}

impl Path {
    /// Check a list of station names against `graph` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the list is empty, names an unknown station, or
    /// has a consecutive pair with no edge between them.
    pub fn new(graph: &TransitGraph, stations: Vec<String>) -> Result<Self, RouteError> {
        if stations.is_empty() {
            return Err(RouteError::EmptyPath);
        }
        if let Some(unknown) = stations.iter().find(|s| !graph.contains(s)) {
            return Err(RouteError::UnknownStation(unknown.clone()));
        }
        if let Some(pair) = stations
            .windows(2)
            .find(|pair| graph.weight(&pair[0], &pair[1]).is_none())
        {
            return Err(RouteError::NotAdjacent {
                from: pair[0].clone(),
                to: pair[1].clone(),
            });
        }
        Ok(Self { stations })
    }

    /// Build from vertex ids produced by a search over `graph`.
    pub(crate) fn from_vertices(graph: &TransitGraph, vertices: &[VertexId]) -> Self {
        Self {
            stations: vertices
                .iter()
                .map(|&v| graph.name_of(v).to_string())
                .collect(),
        }
    }

    /// Station names from source to destination.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// First station.
    pub fn source(&self) -> &str {
        &self.stations[0]
    }

    /// Last station.
    pub fn destination(&self) -> &str {
        &self.stations[self.stations.len() - 1]
    }

    /// Number of stations, including both ends.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of edges travelled.
    pub fn hop_count(&self) -> usize {
        self.stations.len() - 1
    }

    /// Returns true if source and destination are the same station.
    pub fn is_trivial(&self) -> bool {
        self.stations.len() == 1
    }

    /// Sum of edge weights along the path.
    pub fn weight(&self, graph: &TransitGraph) -> f64 {
        self.stations
            .windows(2)
            .filter_map(|pair| graph.weight(&pair[0], &pair[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NetworkDefinition, build_graph};

    fn graph() -> TransitGraph {
        build_graph(&NetworkDefinition::new().with_line("yellow", &["A1", "A2", "A3"])).unwrap()
    }

    fn names(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn valid_path() {
        let g = graph();
        let path = Path::new(&g, names(&["A1", "A2", "A3"])).unwrap();

        assert_eq!(path.source(), "A1");
        assert_eq!(path.destination(), "A3");
        assert_eq!(path.station_count(), 3);
        assert_eq!(path.hop_count(), 2);
        assert!(!path.is_trivial());
        assert_eq!(path.weight(&g), 2.0);
    }

    #[test]
    fn single_station_path() {
        let g = graph();
        let path = Path::new(&g, names(&["A2"])).unwrap();

        assert!(path.is_trivial());
        assert_eq!(path.source(), path.destination());
        assert_eq!(path.hop_count(), 0);
        assert_eq!(path.weight(&g), 0.0);
    }

    #[test]
    fn invalid_paths() {
        let g = graph();

        assert_eq!(Path::new(&g, vec![]), Err(RouteError::EmptyPath));
        assert_eq!(
            Path::new(&g, names(&["A1", "Z9"])),
            Err(RouteError::UnknownStation("Z9".into()))
        );
        assert_eq!(
            Path::new(&g, names(&["A1", "A3"])),
            Err(RouteError::NotAdjacent {
                from: "A1".into(),
                to: "A3".into()
            })
        );
    }

    #[test]
    fn serialises_as_name_list() {
        let g = graph();
        let path = Path::new(&g, names(&["A1", "A2"])).unwrap();
        assert_eq!(serde_json::to_string(&path).unwrap(), r#"["A1","A2"]"#);
    }
}
