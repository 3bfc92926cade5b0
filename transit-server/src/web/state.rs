//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::JourneyPlanner;
use crate::provider::TransitDataProvider;

/// Shared application state: the planner behind every handler.
pub struct AppState<P> {
    pub planner: Arc<JourneyPlanner<P>>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            planner: Arc::clone(&self.planner),
        }
    }
}

impl<P: TransitDataProvider> AppState<P> {
    /// Create a new app state.
    pub fn new(planner: JourneyPlanner<P>) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}
