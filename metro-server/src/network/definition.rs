//! Network definition input format.
//!
//! A definition is what the data-loading side hands to the graph builder:
//! an ordered list of lines, each with its stations, and optional station
//! coordinates. It is read from JSON.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::StationOrder;

use super::error::LoadError;

/// Raw definition of a whole network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDefinition {
    /// Lines in definition order.
    pub lines: Vec<LineDefinition>,

    /// Station name → location. Names are matched after normalisation.
    #[serde(default)]
    pub coordinates: BTreeMap<String, CoordinateDefinition>,
}

/// Raw definition of one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDefinition {
    /// Line identifier, canonicalised when built (e.g. "Yellow Line" → `yellow`).
    pub id: String,

    /// Display name; derived from the id when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Station names in running order.
    pub stations: Vec<String>,

    /// Whether `stations` is in running order.
    #[serde(default)]
    pub order: StationOrder,
}

/// Raw latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateDefinition {
    pub lat: f64,
    pub lon: f64,
}

impl NetworkDefinition {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line whose stations are in running order.
    pub fn with_line(mut self, id: &str, stations: &[&str]) -> Self {
        self.lines.push(LineDefinition {
            id: id.to_string(),
            name: None,
            stations: stations.iter().map(|s| s.to_string()).collect(),
            order: StationOrder::Sequence,
        });
        self
    }

    /// Add a line whose running order is unknown.
    pub fn with_unordered_line(mut self, id: &str, stations: &[&str]) -> Self {
        self.lines.push(LineDefinition {
            id: id.to_string(),
            name: None,
            stations: stations.iter().map(|s| s.to_string()).collect(),
            order: StationOrder::Unordered,
        });
        self
    }

    /// Set the location of a station.
    pub fn with_coordinate(mut self, station: &str, lat: f64, lon: f64) -> Self {
        self.coordinates
            .insert(station.to_string(), CoordinateDefinition { lat, lon });
        self
    }

    /// Parse a definition from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a definition from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "lines": [
            {"id": "Yellow Line", "name": "Yellow Line", "stations": ["Kashmere Gate", "Rajiv Chowk"]},
            {"id": "grey", "stations": ["Dwarka", "Nangli"], "order": "unordered"}
        ],
        "coordinates": {"Rajiv Chowk": {"lat": 28.6328, "lon": 77.2197}}
    }"#;

    #[test]
    fn parse_json() {
        let def = NetworkDefinition::from_json(SAMPLE).unwrap();

        assert_eq!(def.lines.len(), 2);
        assert_eq!(def.lines[0].id, "Yellow Line");
        assert_eq!(def.lines[0].name.as_deref(), Some("Yellow Line"));
        assert_eq!(def.lines[0].order, StationOrder::Sequence);
        assert_eq!(def.lines[1].name, None);
        assert_eq!(def.lines[1].order, StationOrder::Unordered);
        assert_eq!(
            def.coordinates.get("Rajiv Chowk"),
            Some(&CoordinateDefinition {
                lat: 28.6328,
                lon: 77.2197
            })
        );
    }

    #[test]
    fn coordinates_are_optional() {
        let def = NetworkDefinition::from_json(r#"{"lines": []}"#).unwrap();
        assert!(def.lines.is_empty());
        assert!(def.coordinates.is_empty());
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = NetworkDefinition::from_json(r#"{"lines": [{"id": 1}]}"#).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn builder_methods() {
        let def = NetworkDefinition::new()
            .with_line("l1", &["A", "B"])
            .with_unordered_line("l2", &["C", "D"])
            .with_coordinate("A", 1.0, 2.0);

        assert_eq!(def.lines.len(), 2);
        assert_eq!(def.lines[1].order, StationOrder::Unordered);
        assert_eq!(def.coordinates.len(), 1);
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let def = NetworkDefinition::load(&path).unwrap();
        assert_eq!(def.lines.len(), 2);
    }

    #[test]
    fn load_missing_file() {
        let err = NetworkDefinition::load("/nonexistent/path/network.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn json_roundtrip_preserves_line_order() {
        let def = NetworkDefinition::new()
            .with_line("zeta", &["A", "B"])
            .with_line("alpha", &["B", "C"]);

        let json = serde_json::to_string(&def).unwrap();
        let back = NetworkDefinition::from_json(&json).unwrap();
        assert_eq!(back, def);
        assert_eq!(back.lines[0].id, "zeta");
    }
}
