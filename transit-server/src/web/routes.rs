//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::warn;

use crate::domain::StopId;
use crate::provider::TransitDataProvider;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<P: TransitDataProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/lines", get(list_lines))
        .route("/journey/plan", get(plan_journey))
        .route("/graph/stats", get(graph_stats))
        .route("/graph/rebuild", post(rebuild_graph))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the lines of the network snapshot.
async fn list_lines<P: TransitDataProvider>(
    State(state): State<AppState<P>>,
) -> Json<LinesResponse> {
    let lines = state
        .planner
        .provider()
        .lines()
        .iter()
        .map(LineResult::from_line)
        .collect();

    Json(LinesResponse { lines })
}

/// Plan the cheapest journey between two stops.
async fn plan_journey<P: TransitDataProvider>(
    State(state): State<AppState<P>>,
    Query(req): Query<PlanJourneyRequest>,
) -> Result<Json<JourneyResponse>, AppError> {
    let from = req.from.trim();
    let to = req.to.trim();

    if from.is_empty() || to.is_empty() {
        return Err(AppError::BadRequest {
            message: "both 'from' and 'to' stop ids are required".to_string(),
        });
    }

    let origin = StopId::from(from);
    let destination = StopId::from(to);

    let journey = state
        .planner
        .find_route(&origin, &destination)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("no route found from {origin} to {destination}"),
        })?;

    Ok(Json(JourneyResponse::from_journey(&journey)))
}

/// Stats from the most recent graph build.
async fn graph_stats<P: TransitDataProvider>(
    State(state): State<AppState<P>>,
) -> Result<Json<GraphStatsResponse>, AppError> {
    let stats = state.planner.stats().await.ok_or_else(|| AppError::NotFound {
        message: "no graph built yet".to_string(),
    })?;

    Ok(Json(GraphStatsResponse::from_stats(&stats)))
}

/// Force a rebuild from the provider's current snapshot.
async fn rebuild_graph<P: TransitDataProvider>(
    State(state): State<AppState<P>>,
) -> Json<GraphStatsResponse> {
    let stats = state.planner.rebuild().await;
    Json(GraphStatsResponse::from_stats(&stats))
}

/// Application error type.
///
/// The planner surfaces absence (unknown stop, no route) as `None`, so the
/// handlers only ever produce client errors; there is no internal-error
/// path.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(status = %status, message = %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
