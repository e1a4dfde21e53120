//! Station names, coordinates and vertices.

use std::collections::BTreeSet;

use super::{DomainError, LineId};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Normalise free text into the canonical station name form.
///
/// Runs of whitespace collapse to a single space and the result is trimmed.
/// Within each word, the first letter of every alphanumeric run is
/// upper-cased and the remaining letters lower-cased, so `"noida sector-18"`
/// becomes `"Noida Sector-18"`. Words that are already entirely upper-case
/// with at least two letters (acronyms such as `AIIMS` or `INA`) are kept
/// as written.
///
/// Station names are stored in this form by the graph builder, so the
/// same rule applied to user input reproduces the stored case.
///
/// # Examples
///
/// ```
/// use metro_server::domain::normalize_station_name;
///
/// assert_eq!(normalize_station_name("  rajiv   chowk "), "Rajiv Chowk");
/// assert_eq!(normalize_station_name("hauz KHAS"), "Hauz KHAS");
/// assert_eq!(normalize_station_name("AIIMS"), "AIIMS");
/// assert_eq!(normalize_station_name("   "), "");
/// ```
pub fn normalize_station_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let letters = || word.chars().filter(|c| c.is_alphabetic());
    if letters().count() >= 2 && letters().all(char::is_uppercase) {
        return word.to_string();
    }

    let mut out = String::with_capacity(word.len());
    let mut run_start = true;
    for c in word.chars() {
        if c.is_alphanumeric() {
            if run_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            run_start = false;
        } else {
            out.push(c);
            run_start = true;
        }
    }
    out
}

/// A validated geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        let invalid = |reason| DomainError::InvalidCoordinate { lat, lon, reason };

        if !lat.is_finite() || !lon.is_finite() {
            return Err(invalid("must be finite numbers"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn haversine_km(&self, other: &Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// A station in the transit graph.
///
/// Stations are created once by the graph builder and never change while
/// the graph is alive. Every station belongs to at least one line; a
/// station on more than one line is an interchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    name: String,
    lines: BTreeSet<LineId>,
    coordinate: Option<Coordinate>,
}

impl Station {
    pub(crate) fn new(
        name: String,
        lines: BTreeSet<LineId>,
        coordinate: Option<Coordinate>,
    ) -> Self {
        Self {
            name,
            lines,
            coordinate,
        }
    }

    /// The canonical station name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lines serving this station, sorted by id.
    pub fn lines(&self) -> &BTreeSet<LineId> {
        &self.lines
    }

    /// The station's location, if known.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    /// Returns true if more than one line serves this station.
    pub fn is_interchange(&self) -> bool {
        self.lines.len() > 1
    }

    /// Returns true if `line` serves this station.
    pub fn is_on(&self, line: &LineId) -> bool {
        self.lines.contains(line)
    }
}
