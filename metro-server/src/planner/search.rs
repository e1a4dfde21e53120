//! Shortest-path searches.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use tracing::{debug, trace};

use crate::network::{TransitGraph, VertexId};

use super::path::Path;

/// Dijkstra frontier entry.
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    vertex: VertexId,
}

impl Eq for State {}

// Reversed so the max-heap pops the cheapest entry; equal costs pop the
// earliest-inserted vertex first.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Follow parent links back from `to` and return the vertices in travel
/// order.
fn walk_back(parent: &[Option<VertexId>], to: VertexId) -> Vec<VertexId> {
    let mut vertices = vec![to];
    let mut current = to;
    while let Some(prev) = parent[current] {
        vertices.push(prev);
        current = prev;
    }
    vertices.reverse();
    vertices
}

impl TransitGraph {
    /// Path with the fewest hops between two stations.
    ///
    /// Breadth-first search exploring neighbours in edge insertion order,
    /// so among equally short paths the result is always the same one.
    /// Returns `None` if either station is unknown or no path exists.
    pub fn find_fewest_hops_path(&self, source: &str, destination: &str) -> Option<Path> {
        let from = self.vertex(source)?;
        let to = self.vertex(destination)?;
        if from == to {
            return Some(Path::from_vertices(self, &[from]));
        }

        let mut visited = vec![false; self.station_count()];
        let mut parent: Vec<Option<VertexId>> = vec![None; self.station_count()];
        let mut queue = VecDeque::from([from]);
        visited[from] = true;

        while let Some(current) = queue.pop_front() {
            for &(next, _) in self.neighbors_of(current) {
                if visited[next] {
                    continue;
                }
                visited[next] = true;
                parent[next] = Some(current);
                if next == to {
                    let path = Path::from_vertices(self, &walk_back(&parent, to));
                    trace!(source, destination, hops = path.hop_count(), "BFS found path");
                    return Some(path);
                }
                queue.push_back(next);
            }
        }

        debug!(source, destination, "No path between stations");
        None
    }

    /// Path with the smallest total edge weight, and that weight.
    ///
    /// Dijkstra's algorithm over a binary heap. Settled vertices are never
    /// reopened and stale heap entries are skipped. Returns `None` if
    /// either station is unknown or no path exists.
    pub fn find_shortest_weighted_path(
        &self,
        source: &str,
        destination: &str,
    ) -> Option<(f64, Path)> {
        let from = self.vertex(source)?;
        let to = self.vertex(destination)?;

        let n = self.station_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut parent: Vec<Option<VertexId>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut heap = BinaryHeap::new();

        dist[from] = 0.0;
        heap.push(State {
            cost: 0.0,
            vertex: from,
        });

        while let Some(State { cost, vertex }) = heap.pop() {
            if settled[vertex] {
                continue;
            }
            settled[vertex] = true;

            if vertex == to {
                let path = Path::from_vertices(self, &walk_back(&parent, to));
                trace!(source, destination, cost, hops = path.hop_count(), "Dijkstra found path");
                return Some((cost, path));
            }

            for &(next, weight) in self.neighbors_of(vertex) {
                if settled[next] {
                    continue;
                }
                let candidate = cost + weight;
                if candidate < dist[next] {
                    dist[next] = candidate;
                    parent[next] = Some(vertex);
                    heap.push(State {
                        cost: candidate,
                        vertex: next,
                    });
                }
            }
        }

        debug!(source, destination, "No weighted path between stations");
        None
    }
}
