//! Splitting a path into single-line segments.

use tracing::trace;

use crate::domain::{Line, LineId};
use crate::network::TransitGraph;

use super::error::RouteError;
use super::path::Path;

/// A stretch of a route travelled on one line.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    line: LineId,
    line_name: String,
    stations: Vec<String>,
}

impl RouteSegment {
    /// The line travelled.
    pub fn line(&self) -> &LineId {
        &self.line
    }

    /// Display name of the line.
    pub fn line_name(&self) -> &str {
        &self.line_name
    }

    /// Stations covered, both ends included.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// Boarding station.
    pub fn start(&self) -> &str {
        &self.stations[0]
    }

    /// Alighting station.
    pub fn end(&self) -> &str {
        &self.stations[self.stations.len() - 1]
    }

    /// Number of stops travelled.
    pub fn stop_count(&self) -> usize {
        self.stations.len() - 1
    }
}

/// A change of line between two consecutive segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Interchange {
    /// Where the change happens.
    pub station: String,
    pub from_line: LineId,
    pub from_line_name: String,
    pub to_line: LineId,
    pub to_line_name: String,
}

impl Interchange {
    /// Human-readable instruction, e.g.
    /// `"At Rajiv Chowk, change from Yellow Line to Blue Line"`.
    pub fn instruction(&self) -> String {
        format!(
            "At {}, change from {} to {}",
            self.station, self.from_line_name, self.to_line_name
        )
    }
}

/// Interchanges between consecutive segments.
pub fn interchanges(segments: &[RouteSegment]) -> Vec<Interchange> {
    segments
        .windows(2)
        .map(|pair| Interchange {
            station: pair[0].end().to_string(),
            from_line: pair[0].line.clone(),
            from_line_name: pair[0].line_name.clone(),
            to_line: pair[1].line.clone(),
            to_line_name: pair[1].line_name.clone(),
        })
        .collect()
}

impl TransitGraph {
    /// Split `path` into maximal runs travelled on a single line.
    ///
    /// Each hop may be served by several lines. Lines on which the two
    /// stations are listed next to each other are preferred; otherwise
    /// any line serving both will do. Starting from the first hop, the
    /// candidate line covering the most following hops is taken (ties go
    /// to the smallest line id) and a new segment starts where it ends.
    ///
    /// A single-station path has no segments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if two consecutive stations share no line.
    pub fn segment_route(&self, path: &Path) -> Result<Vec<RouteSegment>, RouteError> {
        let stations = path.stations();
        let candidates = stations
            .windows(2)
            .map(|pair| self.hop_lines(&pair[0], &pair[1]))
            .collect::<Result<Vec<_>, _>>()?;

        let mut segments = Vec::new();
        let mut start = 0;
        while start < candidates.len() {
            let (line, run) = candidates[start]
                .iter()
                .map(|line| {
                    let run = candidates[start..]
                        .iter()
                        .take_while(|hop| hop.iter().any(|l| l.id() == line.id()))
                        .count();
                    (*line, run)
                })
                .fold(None, |best: Option<(&Line, usize)>, (line, run)| match best {
                    Some((_, best_run)) if best_run >= run => best,
                    _ => Some((line, run)),
                })
                .ok_or_else(|| RouteError::NoConnectingLine {
                    from: stations[start].clone(),
                    to: stations[start + 1].clone(),
                })?;

            let end = start + run;
            trace!(
                line = %line.id(),
                from = %stations[start],
                to = %stations[end],
                "Route segment"
            );
            segments.push(RouteSegment {
                line: line.id().clone(),
                line_name: line.name().to_string(),
                stations: stations[start..=end].to_vec(),
            });
            start = end;
        }

        Ok(segments)
    }

    /// Lines that can carry a passenger from `a` to `b`, sorted by id.
    fn hop_lines(&self, a: &str, b: &str) -> Result<Vec<&Line>, RouteError> {
        let common = self.common_lines(a, b);
        if common.is_empty() {
            return Err(RouteError::NoConnectingLine {
                from: a.to_string(),
                to: b.to_string(),
            });
        }

        let adjacent: Vec<&Line> = common
            .iter()
            .copied()
            .filter(|line| line.is_adjacent(a, b))
            .collect();
        Ok(if adjacent.is_empty() { common } else { adjacent })
    }
}
