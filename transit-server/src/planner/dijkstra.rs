//! Weighted shortest-path search over the transit graph.
//!
//! Classic binary-heap Dijkstra. A stop may be represented by several nodes
//! (one per line), so the search is multi-source/multi-sink: every node at
//! the origin stop starts at distance zero, and the search terminates the
//! moment any node at the destination stop is popped as the current
//! minimum. Non-negative weights are guaranteed by the one-minute edge
//! floor.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::domain::StopId;
use crate::graph::{Graph, NodeIndex};

/// A solved path: the node sequence and its total cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    /// Nodes from an origin-stop node to a destination-stop node.
    pub nodes: Vec<NodeIndex>,

    /// Total cost in seconds, transfer penalties included.
    pub cost_secs: u32,
}

impl ShortestPath {
    /// Total cost in minutes.
    pub fn cost_mins(&self) -> f64 {
        self.cost_secs as f64 / 60.0
    }
}

/// Heap entry ordered as a min-heap on cost.
///
/// Ties break on the smaller node index, which makes the settle order (and
/// therefore the chosen path among equal-cost alternatives) deterministic:
/// node indices follow line declaration order, then stop order along each
/// route.
#[derive(Copy, Clone, Eq, PartialEq)]
struct QueueEntry {
    cost: u32,
    node: NodeIndex,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on cost so BinaryHeap becomes a min-heap; reversed on
        // node so the smaller index pops first among equals.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the cheapest path between two stops.
///
/// Returns `None` if either stop is absent from the graph or no path
/// exists. If origin and destination are the same stop, the result is a
/// single-node path with zero cost (callers treat it as a trivial journey).
pub fn find_path(graph: &Graph, origin: &StopId, destination: &StopId) -> Option<ShortestPath> {
    let sources = graph.nodes_at(origin);
    if sources.is_empty() || graph.nodes_at(destination).is_empty() {
        return None;
    }

    let n = graph.node_count();
    let mut dist: Vec<u32> = vec![u32::MAX; n];
    let mut prev: Vec<Option<NodeIndex>> = vec![None; n];
    let mut heap = BinaryHeap::new();

    for &source in sources {
        dist[source as usize] = 0;
        heap.push(QueueEntry {
            cost: 0,
            node: source,
        });
    }

    while let Some(QueueEntry { cost, node }) = heap.pop() {
        if cost > dist[node as usize] {
            continue; // Stale entry for an already-improved node.
        }

        if graph.node(node).stop == *destination {
            return Some(reconstruct(&prev, node, cost));
        }

        for edge in graph.edges_from(node) {
            let next_cost = cost.saturating_add(edge.duration_secs);
            if next_cost < dist[edge.to as usize] {
                dist[edge.to as usize] = next_cost;
                prev[edge.to as usize] = Some(node);
                heap.push(QueueEntry {
                    cost: next_cost,
                    node: edge.to,
                });
            }
        }
    }

    None
}

/// Walk predecessor pointers back from the settled destination node.
fn reconstruct(prev: &[Option<NodeIndex>], destination: NodeIndex, cost_secs: u32) -> ShortestPath {
    let mut nodes = vec![destination];
    let mut current = destination;

    while let Some(p) = prev[current as usize] {
        nodes.push(p);
        current = p;
    }

    nodes.reverse();
    ShortestPath { nodes, cost_secs }
}
