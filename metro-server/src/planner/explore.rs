//! Graph exploration beyond single shortest paths.

use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use crate::network::{TransitGraph, VertexId};

use super::path::Path;

impl TransitGraph {
    /// Every simple path from `source` to `destination` with at most
    /// `max_len` stations, in depth-first discovery order.
    ///
    /// The number of paths grows exponentially with `max_len`; callers
    /// must keep the bound small. Unknown stations give an empty list.
    pub fn enumerate_alternate_paths(
        &self,
        source: &str,
        destination: &str,
        max_len: usize,
    ) -> Vec<Path> {
        let (Some(from), Some(to)) = (self.vertex(source), self.vertex(destination)) else {
            return Vec::new();
        };
        if max_len == 0 {
            return Vec::new();
        }

        let mut found = Vec::new();
        let mut on_path = vec![false; self.station_count()];
        let mut current = vec![from];
        on_path[from] = true;
        self.extend_simple_paths(to, max_len, &mut current, &mut on_path, &mut found);

        debug!(source, destination, max_len, paths = found.len(), "Enumerated alternate paths");
        found
    }

    fn extend_simple_paths(
        &self,
        to: VertexId,
        max_len: usize,
        current: &mut Vec<VertexId>,
        on_path: &mut [bool],
        found: &mut Vec<Path>,
    ) {
        let Some(&last) = current.last() else {
            return;
        };
        if last == to {
            found.push(Path::from_vertices(self, current));
            return;
        }
        if current.len() == max_len {
            return;
        }

        for &(next, _) in self.neighbors_of(last) {
            if on_path[next] {
                continue;
            }
            on_path[next] = true;
            current.push(next);
            self.extend_simple_paths(to, max_len, current, on_path, found);
            current.pop();
            on_path[next] = false;
        }
    }

    /// All stations reachable from `source`, including itself.
    ///
    /// Empty if `source` is unknown.
    pub fn connected_component(&self, source: &str) -> BTreeSet<&str> {
        let Some(from) = self.vertex(source) else {
            return BTreeSet::new();
        };
        self.reachable_from(from)
            .into_iter()
            .enumerate()
            .filter(|&(_, seen)| seen)
            .map(|(v, _)| self.name_of(v))
            .collect()
    }

    /// Returns true if a path joins the two stations.
    ///
    /// Every station reaches itself; unknown stations reach nothing.
    pub fn is_reachable(&self, source: &str, destination: &str) -> bool {
        match (self.vertex(source), self.vertex(destination)) {
            (Some(from), Some(to)) => self.reachable_from(from)[to],
            _ => false,
        }
    }

    fn reachable_from(&self, from: VertexId) -> Vec<bool> {
        let mut seen = vec![false; self.station_count()];
        let mut queue = VecDeque::from([from]);
        seen[from] = true;
        while let Some(current) = queue.pop_front() {
            for &(next, _) in self.neighbors_of(current) {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// A station both `a` and `b` can reach with the fewest expansion
    /// rounds.
    ///
    /// Searches outward from both stations one level at a time,
    /// alternating sides, and returns the first station one side
    /// discovers that the other side has already seen. Returns `a` when
    /// both names are the same station, and `None` if either is unknown
    /// or they are disconnected.
    pub fn find_nearest_common_station(&self, a: &str, b: &str) -> Option<&str> {
        let from_a = self.vertex(a)?;
        let from_b = self.vertex(b)?;
        if from_a == from_b {
            return Some(self.name_of(from_a));
        }

        let n = self.station_count();
        let mut seen_a = vec![false; n];
        let mut seen_b = vec![false; n];
        seen_a[from_a] = true;
        seen_b[from_b] = true;
        let mut frontier_a = vec![from_a];
        let mut frontier_b = vec![from_b];

        while !frontier_a.is_empty() || !frontier_b.is_empty() {
            if let Some(meet) = self.expand_level(&mut frontier_a, &mut seen_a, &seen_b) {
                return Some(self.name_of(meet));
            }
            if let Some(meet) = self.expand_level(&mut frontier_b, &mut seen_b, &seen_a) {
                return Some(self.name_of(meet));
            }
        }
        None
    }

    /// Replace `frontier` with its unseen neighbours, stopping at the first
    /// neighbour the other side has seen.
    fn expand_level(
        &self,
        frontier: &mut Vec<VertexId>,
        seen: &mut [bool],
        other: &[bool],
    ) -> Option<VertexId> {
        let mut next_level = Vec::new();
        for &current in frontier.iter() {
            for &(next, _) in self.neighbors_of(current) {
                if other[next] {
                    return Some(next);
                }
                if !seen[next] {
                    seen[next] = true;
                    next_level.push(next);
                }
            }
        }
        *frontier = next_level;
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::network::{NetworkDefinition, TransitGraph, build_graph};

    /// A1-A2-A3-A4 with a shortcut A1-B1-A4, plus an island.
    fn graph() -> TransitGraph {
        let def = NetworkDefinition::new()
            .with_line("red", &["A1", "A2", "A3", "A4"])
            .with_line("green", &["A1", "B1", "A4"])
            .with_line("grey", &["X1", "X2"]);
        build_graph(&def).unwrap()
    }

    #[test]
    fn alternates_in_discovery_order() {
        let g = graph();
        let paths = g.enumerate_alternate_paths("A1", "A4", 10);
        let lists: Vec<&[String]> = paths.iter().map(|p| p.stations()).collect();

        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0], ["A1", "A2", "A3", "A4"]);
        assert_eq!(lists[1], ["A1", "B1", "A4"]);
    }

    #[test]
    fn alternates_respect_length_bound() {
        let g = graph();

        let paths = g.enumerate_alternate_paths("A1", "A4", 3);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].stations(), ["A1", "B1", "A4"]);

        assert!(g.enumerate_alternate_paths("A1", "A4", 2).is_empty());
        assert!(g.enumerate_alternate_paths("A1", "A4", 0).is_empty());
    }

    #[test]
    fn alternates_for_same_or_unknown_station() {
        let g = graph();

        let same = g.enumerate_alternate_paths("A2", "A2", 5);
        assert_eq!(same.len(), 1);
        assert!(same[0].is_trivial());

        assert!(g.enumerate_alternate_paths("A1", "Nowhere", 5).is_empty());
        assert!(g.enumerate_alternate_paths("A1", "X1", 10).is_empty());
    }

    #[test]
    fn component_and_reachability() {
        let g = graph();

        let component = g.connected_component("A3");
        assert_eq!(component.into_iter().collect::<Vec<_>>(), vec!["A1", "A2", "A3", "A4", "B1"]);
        assert_eq!(g.connected_component("X2").len(), 2);
        assert!(g.connected_component("Nowhere").is_empty());

        assert!(g.is_reachable("A1", "B1"));
        assert!(g.is_reachable("X1", "X1"));
        assert!(!g.is_reachable("A1", "X1"));
        assert!(!g.is_reachable("A1", "Nowhere"));
    }

    #[test]
    fn nearest_common_station() {
        let g = graph();

        assert_eq!(g.find_nearest_common_station("A2", "A2"), Some("A2"));
        // A2's side sees A1 and A3 first, then A4's side finds A3.
        assert_eq!(g.find_nearest_common_station("A2", "A4"), Some("A3"));
        assert_eq!(g.find_nearest_common_station("A1", "A2"), Some("A2"));
        assert_eq!(g.find_nearest_common_station("A1", "X1"), None);
        assert_eq!(g.find_nearest_common_station("A1", "Nowhere"), None);
    }
}
