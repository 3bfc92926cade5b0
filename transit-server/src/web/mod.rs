//! Web layer for the transit journey planner.
//!
//! Provides HTTP endpoints for planning journeys and inspecting the graph.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{create_router, AppError};
pub use state::AppState;
