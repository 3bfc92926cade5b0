//! Transfer edge synthesis.
//!
//! Runs after ride edges exist. Adds same-station interchange edges between
//! every ordered pair of distinct-line nodes, and walking edges for every
//! recorded correspondence whose destination stop is known to the graph.
//! Transfer edges never carry line identity.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Correspondence, StopId};
use crate::planner::PlannerConfig;

use super::model::{EdgeKind, Graph, TransitEdge};

/// Add interchange and walking-transfer edges to a graph.
///
/// `correspondences` holds the already-fetched walking connections per
/// stop. A stop with zero or one line and no correspondences contributes no
/// transfer edges.
pub(crate) fn synthesize(
    graph: &mut Graph,
    correspondences: &HashMap<StopId, Vec<Correspondence>>,
    config: &PlannerConfig,
) {
    let stop_ids = graph.stop_ids();

    // Same-station interchanges: every ordered pair of distinct-line nodes.
    for stop in &stop_ids {
        let nodes = graph.nodes_at(stop).to_vec();

        for &from in &nodes {
            for &to in &nodes {
                if from == to || graph.node(from).line == graph.node(to).line {
                    continue;
                }
                graph.add_edge(
                    from,
                    TransitEdge {
                        to,
                        duration_secs: config.transfer_penalty_secs(),
                        kind: EdgeKind::Transfer,
                        line: None,
                    },
                );
            }
        }
    }

    // Walking correspondences: each node at the source stop connects to
    // each node at the destination stop.
    for from_stop in &stop_ids {
        let Some(corrs) = correspondences.get(from_stop) else {
            continue;
        };

        for corr in corrs {
            if corr.to == *from_stop {
                continue;
            }

            let to_nodes = graph.nodes_at(&corr.to).to_vec();
            if to_nodes.is_empty() {
                debug!(
                    from = %from_stop,
                    to = %corr.to,
                    "correspondence target not in graph; skipping"
                );
                continue;
            }

            let duration_secs = config.walk_transfer_secs(corr.walk_minutes);
            let from_nodes = graph.nodes_at(from_stop).to_vec();

            for &from in &from_nodes {
                for &to in &to_nodes {
                    graph.add_edge(
                        from,
                        TransitEdge {
                            to,
                            duration_secs,
                            kind: EdgeKind::Transfer,
                            line: None,
                        },
                    );
                }
            }
        }
    }
}
