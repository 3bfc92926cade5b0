//! Graph construction from the provider's network snapshot.
//!
//! Builds are best-effort: a route or stop whose fetch fails contributes no
//! edges, the rest of the network still builds. Failures are logged and
//! counted in the returned stats so systematic data gaps stay visible.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::{Correspondence, RouteId, Stop, StopId};
use crate::planner::PlannerConfig;
use crate::provider::TransitDataProvider;

use super::geo::great_circle_km;
use super::model::{EdgeKind, Graph, TransitEdge};
use super::transfers;

/// Counters describing a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub stops: usize,
    pub lines: usize,

    /// Route/correspondence fetches that failed and were skipped.
    pub failed_fetches: usize,
}

/// Builds a `Graph` from a provider's current snapshot.
pub struct GraphBuilder<'a, P> {
    provider: &'a P,
    config: &'a PlannerConfig,
}

impl<'a, P: TransitDataProvider> GraphBuilder<'a, P> {
    pub fn new(provider: &'a P, config: &'a PlannerConfig) -> Self {
        Self { provider, config }
    }

    /// Build a complete graph: ride edges per line, then transfer edges.
    ///
    /// Never fails; fetch errors degrade coverage and are reported in the
    /// stats.
    pub async fn build(&self) -> (Graph, GraphStats) {
        let lines = self.provider.lines();
        let mut graph = Graph::new();
        let mut failed_fetches = 0;

        // Fetch every route's stop sequence in bounded parallel batches.
        // Route ids are deduplicated; two lines sharing a route fetch once.
        let mut route_ids: Vec<RouteId> = Vec::new();
        for line in &lines {
            for route in line.routes() {
                if !route_ids.contains(route) {
                    route_ids.push(route.clone());
                }
            }
        }

        let mut sequences: HashMap<RouteId, Vec<Stop>> = HashMap::new();
        for batch in route_ids.chunks(self.config.fetch_batch_size) {
            let fetches: Vec<_> = batch
                .iter()
                .map(|route| async move {
                    (route.clone(), self.provider.stops_for_route(route).await)
                })
                .collect();

            for (route, result) in join_all(fetches).await {
                match result {
                    Ok(stops) => {
                        sequences.insert(route, stops);
                    }
                    Err(e) => {
                        warn!(
                            route = %route,
                            error = %e,
                            "failed to fetch stop sequence; line coverage degraded"
                        );
                        failed_fetches += 1;
                    }
                }
            }
        }

        // Ride edges, applied in line declaration order then stop order so
        // node indices are deterministic for a given snapshot.
        for line in &lines {
            graph.add_line(line.clone());

            for route in line.routes() {
                let Some(stops) = sequences.get(route) else {
                    continue;
                };

                if stops.len() < 2 {
                    debug!(route = %route, line = %line.id, "route has fewer than two stops; skipping");
                    continue;
                }

                for pair in stops.windows(2) {
                    let (a, b) = (&pair[0], &pair[1]);
                    let duration_secs =
                        self.config.ride_secs(great_circle_km(&a.location, &b.location));

                    let na = graph.intern_node(a, &line.id);
                    let nb = graph.intern_node(b, &line.id);

                    graph.add_edge(
                        na,
                        TransitEdge {
                            to: nb,
                            duration_secs,
                            kind: EdgeKind::Ride,
                            line: Some(line.id.clone()),
                        },
                    );
                    graph.add_edge(
                        nb,
                        TransitEdge {
                            to: na,
                            duration_secs,
                            kind: EdgeKind::Ride,
                            line: Some(line.id.clone()),
                        },
                    );
                }
            }
        }

        // Walking correspondences for every stop the graph now knows.
        let stop_ids = graph.stop_ids();
        let mut correspondences: HashMap<StopId, Vec<Correspondence>> = HashMap::new();

        for batch in stop_ids.chunks(self.config.fetch_batch_size) {
            let fetches: Vec<_> = batch
                .iter()
                .map(|stop| async move {
                    (stop.clone(), self.provider.correspondences(stop).await)
                })
                .collect();

            for (stop, result) in join_all(fetches).await {
                match result {
                    Ok(corrs) if !corrs.is_empty() => {
                        correspondences.insert(stop, corrs);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(
                            stop = %stop,
                            error = %e,
                            "failed to fetch correspondences; walking transfers degraded"
                        );
                        failed_fetches += 1;
                    }
                }
            }
        }

        transfers::synthesize(&mut graph, &correspondences, self.config);

        let stats = GraphStats {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            stops: graph.stop_count(),
            lines: graph.line_count(),
            failed_fetches,
        };

        info!(
            nodes = stats.nodes,
            edges = stats.edges,
            stops = stats.stops,
            lines = stats.lines,
            failed_fetches = stats.failed_fetches,
            "transit graph built"
        );

        (graph, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, Line, LineId, TransportMode};
    use crate::provider::MockTransitProvider;

    fn stop(id: &str, lat: f64, lon: f64) -> Stop {
        Stop::new(id, format!("Stop {id}"), Coordinates::new(lat, lon))
    }

    fn line(id: &str, routes: &[&str]) -> Line {
        Line::new(
            id,
            format!("Line {id}"),
            "#FFCD00",
            TransportMode::Metro,
            routes.iter().map(|r| RouteId::from(*r)).collect(),
        )
        .unwrap()
    }

    fn single_line_provider() -> MockTransitProvider {
        let mut provider = MockTransitProvider::new();
        provider.add_line(line("L1", &["R1"]));
        provider.add_route(
            "R1",
            vec![
                stop("A", 0.0, 0.0),
                stop("B", 0.0, 0.01),
                stop("C", 0.0, 0.02),
            ],
        );
        provider
    }

    #[tokio::test]
    async fn single_line_counts() {
        let provider = single_line_provider();
        let config = PlannerConfig::default();
        let (graph, stats) = GraphBuilder::new(&provider, &config).build().await;

        // Three nodes, two hops, two directed edges per hop.
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.edges, 4);
        assert_eq!(stats.stops, 3);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.failed_fetches, 0);
        assert!(graph.has_stop(&StopId::from("B")));
    }

    #[tokio::test]
    async fn ride_weights_are_symmetric() {
        let provider = single_line_provider();
        let config = PlannerConfig::default();
        let (graph, _) = GraphBuilder::new(&provider, &config).build().await;

        let a = graph.nodes_at(&StopId::from("A"))[0];
        let b = graph.nodes_at(&StopId::from("B"))[0];

        let ab = graph.edge_between(a, b).unwrap();
        let ba = graph.edge_between(b, a).unwrap();
        assert_eq!(ab.duration_secs, ba.duration_secs);
        assert_eq!(ab.kind, EdgeKind::Ride);
        assert_eq!(ab.line, Some(LineId::from("L1")));

        // 0.01 deg of longitude at the equator is ~1.11 km; at 30 km/h
        // that's ~2.22 minutes.
        assert!((ab.duration_secs as i64 - 133).abs() <= 1, "got {}", ab.duration_secs);
    }

    #[tokio::test]
    async fn short_route_skipped_silently() {
        let mut provider = MockTransitProvider::new();
        provider.add_line(line("L1", &["R1"]));
        provider.add_route("R1", vec![stop("A", 0.0, 0.0)]);

        let config = PlannerConfig::default();
        let (graph, stats) = GraphBuilder::new(&provider, &config).build().await;

        assert!(graph.is_empty());
        assert_eq!(stats.failed_fetches, 0);
    }

    #[tokio::test]
    async fn failed_route_degrades_not_aborts() {
        let mut provider = single_line_provider();
        provider.add_line(line("L2", &["R2"]));
        provider.fail_route("R2");

        let config = PlannerConfig::default();
        let (graph, stats) = GraphBuilder::new(&provider, &config).build().await;

        // L1 still fully present.
        assert_eq!(graph.node_count(), 3);
        assert_eq!(stats.failed_fetches, 1);
    }

    #[tokio::test]
    async fn failed_correspondence_fetch_degrades_not_aborts() {
        let mut provider = single_line_provider();
        provider.fail_stop("A");

        let config = PlannerConfig::default();
        let (graph, stats) = GraphBuilder::new(&provider, &config).build().await;

        assert_eq!(graph.node_count(), 3);
        assert_eq!(stats.failed_fetches, 1);
    }

    #[tokio::test]
    async fn interchange_stop_gets_transfer_edges() {
        let mut provider = single_line_provider();
        provider.add_line(line("L2", &["R2"]));
        provider.add_route("R2", vec![stop("B", 0.0, 0.01), stop("D", 0.01, 0.01)]);

        let config = PlannerConfig::default();
        let (graph, _) = GraphBuilder::new(&provider, &config).build().await;

        // B is served by both lines: two nodes, transfer edges both ways.
        let b_nodes = graph.nodes_at(&StopId::from("B"));
        assert_eq!(b_nodes.len(), 2);

        let transfer = graph.edge_between(b_nodes[0], b_nodes[1]).unwrap();
        assert_eq!(transfer.kind, EdgeKind::Transfer);
        assert_eq!(transfer.duration_secs, config.transfer_penalty_secs());
        assert!(transfer.line.is_none());
    }

    #[tokio::test]
    async fn rebuild_is_idempotent() {
        let provider = single_line_provider();
        let config = PlannerConfig::default();

        let (_, first) = GraphBuilder::new(&provider, &config).build().await;
        let (_, second) = GraphBuilder::new(&provider, &config).build().await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn multi_route_line_stitches_each_route() {
        let mut provider = MockTransitProvider::new();
        provider.add_line(line("L1", &["R1a", "R1b"]));
        provider.add_route("R1a", vec![stop("A", 0.0, 0.0), stop("B", 0.0, 0.01)]);
        provider.add_route("R1b", vec![stop("B", 0.0, 0.01), stop("C", 0.0, 0.02)]);

        let config = PlannerConfig::default();
        let (graph, stats) = GraphBuilder::new(&provider, &config).build().await;

        // B interned once for the line; both hops present.
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.edges, 4);
        assert_eq!(graph.nodes_at(&StopId::from("B")).len(), 1);
    }
}
