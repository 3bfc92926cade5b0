//! The transit graph: nodes, edges, and reference data.
//!
//! A node is "a stop as served by a specific line", so a stop shared by
//! three lines contributes three nodes. Nodes are held in an arena and
//! addressed by index; the adjacency list stores outgoing edges per node.
//!
//! A `Graph` is immutable once built. Rebuilds construct a fresh graph and
//! swap it in wholesale (see `planner::engine`), so queries never observe a
//! partially populated one.

use std::collections::HashMap;

use crate::domain::{Line, LineId, Stop, StopId};

/// Handle to a node in the graph arena.
pub type NodeIndex = u32;

/// A stop as served by a specific line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitNode {
    pub stop: StopId,
    pub line: LineId,
}

/// What kind of movement an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Riding between consecutive stops of a line.
    Ride,
    /// Changing lines, in place or via a walking correspondence.
    Transfer,
}

/// A directed edge to another node.
///
/// Weights are stored as whole seconds so the search needs no float
/// ordering; the 1-minute weight floor becomes 60 seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitEdge {
    /// Target node.
    pub to: NodeIndex,

    /// Traversal cost in seconds, always >= 60.
    pub duration_secs: u32,

    /// Ride or transfer.
    pub kind: EdgeKind,

    /// Line ridden; `None` for transfer edges.
    pub line: Option<LineId>,
}

/// The node set, adjacency map, and reference data for one network snapshot.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<TransitNode>,
    adjacency: Vec<Vec<TransitEdge>>,
    node_lookup: HashMap<TransitNode, NodeIndex>,
    stop_nodes: HashMap<StopId, Vec<NodeIndex>>,
    stops: HashMap<StopId, Stop>,
    lines: HashMap<LineId, Line>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern the node for `(stop, line)`, registering the stop's reference
    /// data on first sight. Returns the existing index if the node is
    /// already present.
    pub(crate) fn intern_node(&mut self, stop: &Stop, line: &LineId) -> NodeIndex {
        let node = TransitNode {
            stop: stop.id.clone(),
            line: line.clone(),
        };

        if let Some(&idx) = self.node_lookup.get(&node) {
            return idx;
        }

        let idx = self.nodes.len() as NodeIndex;
        self.nodes.push(node.clone());
        self.adjacency.push(Vec::new());
        self.node_lookup.insert(node, idx);
        self.stop_nodes
            .entry(stop.id.clone())
            .or_default()
            .push(idx);
        self.stops.entry(stop.id.clone()).or_insert_with(|| stop.clone());

        idx
    }

    /// Register a line's reference data (name, color, mode).
    pub(crate) fn add_line(&mut self, line: Line) {
        self.lines.insert(line.id.clone(), line);
    }

    /// Append an outgoing edge to a node.
    pub(crate) fn add_edge(&mut self, from: NodeIndex, edge: TransitEdge) {
        self.adjacency[from as usize].push(edge);
    }

    /// The node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds; indices only come from this graph.
    pub fn node(&self, idx: NodeIndex) -> &TransitNode {
        &self.nodes[idx as usize]
    }

    /// Outgoing edges of the node at `idx`.
    pub fn edges_from(&self, idx: NodeIndex) -> &[TransitEdge] {
        &self.adjacency[idx as usize]
    }

    /// All nodes at a stop (one per line serving it). Empty if the stop is
    /// unknown.
    pub fn nodes_at(&self, stop: &StopId) -> &[NodeIndex] {
        self.stop_nodes.get(stop).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if any line serves this stop.
    pub fn has_stop(&self, stop: &StopId) -> bool {
        self.stop_nodes.contains_key(stop)
    }

    /// Reference data for a stop.
    pub fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    /// Reference data for a line.
    pub fn line(&self, id: &LineId) -> Option<&Line> {
        self.lines.get(id)
    }

    /// All known stop ids, sorted for deterministic iteration.
    pub fn stop_ids(&self) -> Vec<StopId> {
        let mut ids: Vec<StopId> = self.stops.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// The weight of the cheapest edge from `from` to `to`, if one exists.
    pub fn edge_between(&self, from: NodeIndex, to: NodeIndex) -> Option<&TransitEdge> {
        self.adjacency[from as usize]
            .iter()
            .filter(|e| e.to == to)
            .min_by_key(|e| e.duration_secs)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the graph has no nodes (never built, or built from an
    /// empty snapshot).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
