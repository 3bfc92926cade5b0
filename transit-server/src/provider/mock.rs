//! Mock provider for testing and offline development.
//!
//! Serves a network description held in memory, optionally loaded from a
//! JSON file, and can inject per-route/per-stop fetch failures to exercise
//! the builder's degraded-coverage path.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::error::ProviderError;
use super::types::NetworkDto;
use crate::domain::{Correspondence, Line, RouteId, Stop, StopId};

/// In-memory transit data provider.
#[derive(Debug, Clone, Default)]
pub struct MockTransitProvider {
    lines: Vec<Line>,
    routes: HashMap<RouteId, Vec<Stop>>,
    correspondences: HashMap<StopId, Vec<Correspondence>>,
    failing_routes: HashSet<RouteId>,
    failing_stops: HashSet<StopId>,
}

impl MockTransitProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a network description from a JSON file.
    ///
    /// The file format is `NetworkDto`: lines, per-route stop sequences,
    /// and per-stop correspondences.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let json = std::fs::read_to_string(path)?;
        let network: NetworkDto = serde_json::from_str(&json).map_err(|e| ProviderError::Json {
            message: e.to_string(),
        })?;
        Self::from_network(network)
    }

    /// Build a provider from an already-parsed network description.
    pub fn from_network(network: NetworkDto) -> Result<Self, ProviderError> {
        let mut provider = Self::new();

        for line in network.lines {
            provider.lines.push(line.into_domain()?);
        }

        for (route_id, stops) in network.routes {
            provider.routes.insert(
                route_id.into(),
                stops.into_iter().map(|s| s.into_domain()).collect(),
            );
        }

        for (stop_id, corrs) in network.correspondences {
            provider.correspondences.insert(
                stop_id.into(),
                corrs.into_iter().map(|c| c.into_domain()).collect(),
            );
        }

        Ok(provider)
    }

    /// Add a line.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Set the ordered stop sequence of a route.
    pub fn add_route(&mut self, route: impl Into<RouteId>, stops: Vec<Stop>) {
        self.routes.insert(route.into(), stops);
    }

    /// Record a walking correspondence from one stop to another
    /// (one direction only).
    pub fn add_correspondence(
        &mut self,
        from: impl Into<StopId>,
        to: impl Into<StopId>,
        walk_minutes: f64,
    ) {
        self.correspondences
            .entry(from.into())
            .or_default()
            .push(Correspondence::new(to.into(), walk_minutes));
    }

    /// Make `stops_for_route` fail for the given route.
    pub fn fail_route(&mut self, route: impl Into<RouteId>) {
        self.failing_routes.insert(route.into());
    }

    /// Make `correspondences` fail for the given stop.
    pub fn fail_stop(&mut self, stop: impl Into<StopId>) {
        self.failing_stops.insert(stop.into());
    }
}

impl super::TransitDataProvider for MockTransitProvider {
    fn lines(&self) -> Vec<Line> {
        self.lines.clone()
    }

    async fn stops_for_route(&self, route: &RouteId) -> Result<Vec<Stop>, ProviderError> {
        if self.failing_routes.contains(route) {
            return Err(ProviderError::Api {
                status: 500,
                message: format!("injected failure for route {route}"),
            });
        }

        self.routes
            .get(route)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownRoute(route.clone()))
    }

    async fn correspondences(&self, stop: &StopId) -> Result<Vec<Correspondence>, ProviderError> {
        if self.failing_stops.contains(stop) {
            return Err(ProviderError::Api {
                status: 500,
                message: format!("injected failure for stop {stop}"),
            });
        }

        // A stop without recorded correspondences is normal, not an error.
        Ok(self.correspondences.get(stop).cloned().unwrap_or_default())
    }
}
