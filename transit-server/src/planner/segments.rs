//! Segment reconstruction.
//!
//! Collapses a solved node path into presentable journey segments: one ride
//! segment per stretch travelled on a single line, one walking segment per
//! correspondence crossed. Same-station interchanges produce no segment of
//! their own; they only close the current ride.

use tracing::debug;

use crate::domain::{Coordinates, JourneySegment, SegmentKind, Stop, TransportMode};
use crate::graph::{EdgeKind, Graph, NodeIndex};

use super::config::PlannerConfig;

/// Build the segment list for a solved node path.
///
/// An empty or single-node path yields no segments (the trivial
/// origin-equals-destination case).
pub(crate) fn build_segments(
    graph: &Graph,
    nodes: &[NodeIndex],
    config: &PlannerConfig,
) -> Vec<JourneySegment> {
    if nodes.len() < 2 {
        return Vec::new();
    }

    let mut segments = Vec::new();

    // The ride currently being accumulated: stops visited so far and the
    // summed weight of the ride edges between them.
    let mut run: Vec<Stop> = vec![stop_data(graph, nodes[0])];
    let mut run_secs: u32 = 0;

    for pair in nodes.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let from_node = graph.node(from);
        let to_node = graph.node(to);

        if from_node.stop == to_node.stop {
            // In-place interchange: close the ride, restart at the same
            // stop on the new line.
            flush_ride(graph, &mut segments, &mut run, &mut run_secs, from);
            run = vec![stop_data(graph, to)];
            continue;
        }

        // The cheapest recorded edge is the one the search traversed. A
        // correspondence can link two stops of the same line, so the edge
        // kind, not line identity, decides ride vs walk.
        let walked = match graph.edge_between(from, to) {
            Some(edge) => edge.kind == EdgeKind::Transfer,
            None => from_node.line != to_node.line,
        };

        if !walked {
            // Ride hop along the current line.
            run_secs += hop_secs(graph, from, to, config);
            run.push(stop_data(graph, to));
            continue;
        }

        // A walking correspondence.
        flush_ride(graph, &mut segments, &mut run, &mut run_secs, from);

        let origin = stop_data(graph, from);
        let destination = stop_data(graph, to);
        let duration_secs = walk_secs(graph, from, to, &origin, &destination, config);

        segments.push(JourneySegment {
            kind: SegmentKind::Walking,
            mode: TransportMode::Walking,
            line_name: None,
            line_color: None,
            path: vec![origin.location, destination.location],
            intermediate_stops: Vec::new(),
            duration_mins: duration_secs as f64 / 60.0,
            origin,
            destination,
        });

        run = vec![stop_data(graph, to)];
    }

    let last = nodes[nodes.len() - 1];
    flush_ride(graph, &mut segments, &mut run, &mut run_secs, last);

    segments
}

/// Emit the accumulated ride as a segment if it spans at least two stops.
fn flush_ride(
    graph: &Graph,
    segments: &mut Vec<JourneySegment>,
    run: &mut Vec<Stop>,
    run_secs: &mut u32,
    line_node: NodeIndex,
) {
    if run.len() < 2 {
        run.clear();
        *run_secs = 0;
        return;
    }

    let line_id = &graph.node(line_node).line;
    let (mode, line_name, line_color) = match graph.line(line_id) {
        Some(line) => (line.mode, Some(line.name.clone()), Some(line.color.clone())),
        None => {
            debug!(line = %line_id, "line has no reference data; using defaults");
            (TransportMode::Metro, Some(line_id.as_str().to_string()), None)
        }
    };

    let stops = std::mem::take(run);
    let path: Vec<Coordinates> = stops.iter().map(|s| s.location).collect();
    let origin = stops[0].clone();
    let destination = stops[stops.len() - 1].clone();
    let intermediate_stops = stops[1..stops.len() - 1].to_vec();

    segments.push(JourneySegment {
        kind: SegmentKind::Transit,
        mode,
        line_name,
        line_color,
        origin,
        destination,
        intermediate_stops,
        duration_mins: *run_secs as f64 / 60.0,
        path,
    });

    *run_secs = 0;
}

/// Weight of the ride hop actually traversed, or the per-stop fallback if
/// no ride edge connects the pair.
fn hop_secs(graph: &Graph, from: NodeIndex, to: NodeIndex, config: &PlannerConfig) -> u32 {
    match graph.edge_between(from, to) {
        Some(edge) if edge.kind == EdgeKind::Ride => edge.duration_secs,
        _ => config.fallback_hop_secs(),
    }
}

/// Weight of the walking transfer traversed, or a distance-based estimate
/// if no transfer edge connects the pair.
fn walk_secs(
    graph: &Graph,
    from: NodeIndex,
    to: NodeIndex,
    origin: &Stop,
    destination: &Stop,
    config: &PlannerConfig,
) -> u32 {
    match graph.edge_between(from, to) {
        Some(edge) if edge.kind == EdgeKind::Transfer => edge.duration_secs,
        _ => {
            let km = crate::graph::great_circle_km(&origin.location, &destination.location);
            config.walk_estimate_secs(km)
        }
    }
}

fn stop_data(graph: &Graph, node: NodeIndex) -> Stop {
    let id = &graph.node(node).stop;
    // Safe: every node registers its stop's reference data when interned.
    graph.stop(id).unwrap().clone()
}
