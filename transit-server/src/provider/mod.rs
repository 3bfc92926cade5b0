//! Data-provider boundary.
//!
//! The engine's only external dependency is a narrow contract with the
//! app's data-access layer: the current set of lines, the ordered stop
//! sequence of a route, and the walking correspondences of a stop. This
//! module defines that contract and its implementations (HTTP, cached,
//! mock).

mod cache;
mod client;
mod error;
mod mock;
mod types;

use std::future::Future;

pub use cache::{CachedProvider, ProviderCacheConfig};
pub use client::{HttpTransitProvider, ProviderConfig};
pub use error::ProviderError;
pub use mock::MockTransitProvider;
pub use types::{CorrespondenceDto, LineDto, NetworkDto, StopDto};

use crate::domain::{Correspondence, Line, RouteId, Stop, StopId};

/// The data-access contract the planning engine depends on.
///
/// Implementations must be cheap to query repeatedly: graph builds fan out
/// one `stops_for_route` call per route and one `correspondences` call per
/// stop.
pub trait TransitDataProvider: Send + Sync {
    /// Current set of lines to include in the graph.
    fn lines(&self) -> Vec<Line>;

    /// Ordered stop sequence for one underlying route of a line.
    fn stops_for_route(
        &self,
        route: &RouteId,
    ) -> impl Future<Output = Result<Vec<Stop>, ProviderError>> + Send;

    /// Walking connections from a station.
    fn correspondences(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<Vec<Correspondence>, ProviderError>> + Send;
}
