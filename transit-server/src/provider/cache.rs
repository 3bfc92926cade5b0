//! Caching layer over a transit data provider.
//!
//! Graph builds fan out one `correspondences` call per stop, which is
//! expensive against a real network. The topology is near-static, so a
//! TTL-bounded cache in front of the provider makes rebuilds cheap.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use super::error::ProviderError;
use super::TransitDataProvider;
use crate::domain::{Correspondence, Line, RouteId, Stop, StopId};

/// Configuration for the provider cache.
#[derive(Debug, Clone)]
pub struct ProviderCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl Default for ProviderCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Provider wrapper that caches route stop sequences and per-stop
/// correspondences.
///
/// Fetch failures are not cached, so a rebuild after a transient outage
/// retries the failed items.
pub struct CachedProvider<P> {
    inner: P,
    route_stops: MokaCache<RouteId, Arc<Vec<Stop>>>,
    correspondences: MokaCache<StopId, Arc<Vec<Correspondence>>>,
}

impl<P: TransitDataProvider> CachedProvider<P> {
    /// Wrap a provider with caching.
    pub fn new(inner: P, config: &ProviderCacheConfig) -> Self {
        let route_stops = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let correspondences = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            route_stops,
            correspondences,
        }
    }

    /// Drop all cached entries (e.g. before a forced rebuild).
    pub fn invalidate_all(&self) {
        self.route_stops.invalidate_all();
        self.correspondences.invalidate_all();
    }
}

impl<P: TransitDataProvider> TransitDataProvider for CachedProvider<P> {
    fn lines(&self) -> Vec<Line> {
        self.inner.lines()
    }

    async fn stops_for_route(&self, route: &RouteId) -> Result<Vec<Stop>, ProviderError> {
        if let Some(hit) = self.route_stops.get(route).await {
            return Ok(hit.as_ref().clone());
        }

        let stops = self.inner.stops_for_route(route).await?;
        self.route_stops
            .insert(route.clone(), Arc::new(stops.clone()))
            .await;
        Ok(stops)
    }

    async fn correspondences(&self, stop: &StopId) -> Result<Vec<Correspondence>, ProviderError> {
        if let Some(hit) = self.correspondences.get(stop).await {
            return Ok(hit.as_ref().clone());
        }

        let corrs = self.inner.correspondences(stop).await?;
        self.correspondences
            .insert(stop.clone(), Arc::new(corrs.clone()))
            .await;
        Ok(corrs)
    }
}
