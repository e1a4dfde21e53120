//! Line identifiers and line definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line id: {reason}")]
pub struct InvalidLineId {
    reason: &'static str,
}

/// A canonical line identifier.
///
/// Identifiers are lower-case words joined by underscores. A trailing
/// word `line` is dropped, so the different spellings a data source may
/// use for one line all map to the same id.
///
/// # Examples
///
/// ```
/// use metro_server::domain::LineId;
///
/// assert_eq!(LineId::parse("Yellow Line").unwrap().as_str(), "yellow");
/// assert_eq!(LineId::parse(" airport-express ").unwrap().as_str(), "airport_express");
/// assert!(LineId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(String);

impl LineId {
    /// Parse and canonicalise a line identifier.
    pub fn parse(raw: &str) -> Result<Self, InvalidLineId> {
        let lower = raw.to_lowercase();
        let mut words: Vec<&str> = lower
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|w| !w.is_empty())
            .collect();

        if words.len() > 1 && words.last() == Some(&"line") {
            words.pop();
        }

        if words.is_empty() {
            return Err(InvalidLineId {
                reason: "must contain at least one word",
            });
        }

        if !words.iter().all(|w| w.chars().all(char::is_alphanumeric)) {
            return Err(InvalidLineId {
                reason: "words must be alphanumeric",
            });
        }

        Ok(LineId(words.join("_")))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name derived from the id: `airport_express` becomes
    /// `Airport Express Line`.
    pub fn default_display_name(&self) -> String {
        let words: Vec<String> = self
            .0
            .split('_')
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect();
        format!("{} Line", words.join(" "))
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the stations of a line are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationOrder {
    /// Stations are listed in running order; neighbours in the list are
    /// adjacent on the line.
    #[default]
    Sequence,
    /// Running order is unknown; adjacency is inferred from coordinates.
    Unordered,
}

/// A line in a built network.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    id: LineId,
    name: String,
    stations: Vec<String>,
    order: StationOrder,
}

impl Line {
    pub(crate) fn new(
        id: LineId,
        name: String,
        stations: Vec<String>,
        order: StationOrder,
    ) -> Self {
        Self {
            id,
            name,
            stations,
            order,
        }
    }

    /// The canonical line id.
    pub fn id(&self) -> &LineId {
        &self.id
    }

    /// Display name, e.g. "Yellow Line".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stations as listed in the definition (canonical names).
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// How the station list is ordered.
    pub fn order(&self) -> StationOrder {
        self.order
    }

    /// Returns true if the line serves `station`.
    pub fn contains(&self, station: &str) -> bool {
        self.stations.iter().any(|s| s == station)
    }

    /// Returns true if `a` and `b` are next to each other in the running
    /// order. Always false for unordered lines.
    pub fn is_adjacent(&self, a: &str, b: &str) -> bool {
        if self.order != StationOrder::Sequence {
            return false;
        }
        self.stations
            .windows(2)
            .any(|pair| (pair[0] == a && pair[1] == b) || (pair[0] == b && pair[1] == a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, stations: &[&str], order: StationOrder) -> Line {
        let id = LineId::parse(id).unwrap();
        let name = id.default_display_name();
        Line::new(
            id,
            name,
            stations.iter().map(|s| s.to_string()).collect(),
            order,
        )
    }

    #[test]
    fn parse_canonicalises() {
        assert_eq!(LineId::parse("Yellow").unwrap().as_str(), "yellow");
        assert_eq!(LineId::parse("YELLOW LINE").unwrap().as_str(), "yellow");
        assert_eq!(LineId::parse("Airport Express").unwrap().as_str(), "airport_express");
        assert_eq!(LineId::parse("airport_express").unwrap().as_str(), "airport_express");
        assert_eq!(LineId::parse("Line 1").unwrap().as_str(), "line_1");
    }

    #[test]
    fn parse_keeps_lone_line_word() {
        assert_eq!(LineId::parse("Line").unwrap().as_str(), "line");
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(LineId::parse("").is_err());
        assert!(LineId::parse(" - _ ").is_err());
    }

    #[test]
    fn parse_rejects_punctuation() {
        assert!(LineId::parse("red/blue").is_err());
        assert!(LineId::parse("red.").is_err());
    }

    #[test]
    fn display_and_debug() {
        let id = LineId::parse("Blue Line").unwrap();
        assert_eq!(format!("{}", id), "blue");
        assert_eq!(format!("{:?}", id), "LineId(blue)");
    }

    #[test]
    fn default_display_name() {
        assert_eq!(LineId::parse("yellow").unwrap().default_display_name(), "Yellow Line");
        assert_eq!(
            LineId::parse("airport express").unwrap().default_display_name(),
            "Airport Express Line"
        );
    }

    #[test]
    fn ordering_is_lexicographic() {
        let blue = LineId::parse("blue").unwrap();
        let yellow = LineId::parse("yellow").unwrap();
        assert!(blue < yellow);
    }

    #[test]
    fn sequence_adjacency() {
        let l = line("l1", &["A", "B", "C"], StationOrder::Sequence);
        assert!(l.is_adjacent("A", "B"));
        assert!(l.is_adjacent("C", "B"));
        assert!(!l.is_adjacent("A", "C"));
        assert!(!l.is_adjacent("A", "Z"));
        assert!(l.contains("C"));
        assert!(!l.contains("Z"));
    }

    #[test]
    fn loop_line_adjacency() {
        let l = line("circle", &["A", "B", "C", "A"], StationOrder::Sequence);
        assert!(l.is_adjacent("C", "A"));
    }

    #[test]
    fn unordered_lines_are_never_adjacent() {
        let l = line("grey", &["A", "B"], StationOrder::Unordered);
        assert!(!l.is_adjacent("A", "B"));
        assert!(l.contains("A"));
    }
}
