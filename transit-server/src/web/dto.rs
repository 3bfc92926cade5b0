//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Journey, JourneySegment, Line, Stop};
use crate::graph::GraphStats;

/// Request to plan a journey.
#[derive(Debug, Deserialize)]
pub struct PlanJourneyRequest {
    /// Origin stop id
    pub from: String,

    /// Destination stop id
    pub to: String,
}

/// A planned journey.
#[derive(Debug, Serialize)]
pub struct JourneyResponse {
    /// Origin stop
    pub origin: StopResult,

    /// Destination stop
    pub destination: StopResult,

    /// Total duration in minutes, interchange penalties included
    pub total_duration_mins: f64,

    /// Total walking time in minutes
    pub walking_duration_mins: f64,

    /// Number of line changes
    pub transfer_count: usize,

    /// Whether the journey stays on a single line
    pub is_direct: bool,

    /// Journey segments in order
    pub segments: Vec<SegmentResult>,
}

impl JourneyResponse {
    pub fn from_journey(journey: &Journey) -> Self {
        Self {
            origin: StopResult::from_stop(journey.origin()),
            destination: StopResult::from_stop(journey.destination()),
            total_duration_mins: journey.total_duration_mins(),
            walking_duration_mins: journey.walking_duration_mins(),
            transfer_count: journey.transfer_count(),
            is_direct: journey.is_direct(),
            segments: journey
                .segments()
                .iter()
                .map(SegmentResult::from_segment)
                .collect(),
        }
    }
}

/// One leg of a journey.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    /// "transit" or "walking"
    pub kind: String,

    /// Transport mode ("metro", "rail", "tram", "bus", "walking")
    pub mode: String,

    /// Line name (transit segments only)
    pub line_name: Option<String>,

    /// Line display color (transit segments only)
    pub line_color: Option<String>,

    /// First stop of the segment
    pub origin: StopResult,

    /// Last stop of the segment
    pub destination: StopResult,

    /// Stops between origin and destination (transit segments only)
    pub intermediate_stops: Vec<StopResult>,

    /// Duration in minutes
    pub duration_mins: f64,

    /// [latitude, longitude] pairs for map rendering
    pub path: Vec<[f64; 2]>,
}

impl SegmentResult {
    pub fn from_segment(segment: &JourneySegment) -> Self {
        let kind = if segment.is_walking() {
            "walking"
        } else {
            "transit"
        };

        Self {
            kind: kind.to_string(),
            mode: segment.mode.as_str().to_string(),
            line_name: segment.line_name.clone(),
            line_color: segment.line_color.clone(),
            origin: StopResult::from_stop(&segment.origin),
            destination: StopResult::from_stop(&segment.destination),
            intermediate_stops: segment
                .intermediate_stops
                .iter()
                .map(StopResult::from_stop)
                .collect(),
            duration_mins: segment.duration_mins,
            path: segment
                .path
                .iter()
                .map(|c| [c.latitude, c.longitude])
                .collect(),
        }
    }
}

/// A stop in responses.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Stop id
    pub id: String,

    /// Display name
    pub name: String,

    pub latitude: f64,
    pub longitude: f64,
}

impl StopResult {
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id.as_str().to_string(),
            name: stop.name.clone(),
            latitude: stop.location.latitude,
            longitude: stop.location.longitude,
        }
    }
}

/// A line in the network listing.
#[derive(Debug, Serialize)]
pub struct LineResult {
    /// Line id
    pub id: String,

    /// Display name
    pub name: String,

    /// Display color
    pub color: String,

    /// Transport mode
    pub mode: String,

    /// Number of routes (directions/branches)
    pub route_count: usize,
}

impl LineResult {
    pub fn from_line(line: &Line) -> Self {
        Self {
            id: line.id.as_str().to_string(),
            name: line.name.clone(),
            color: line.color.clone(),
            mode: line.mode.as_str().to_string(),
            route_count: line.routes().len(),
        }
    }
}

/// Response for the line listing.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

/// Build counters for the current graph.
#[derive(Debug, Serialize)]
pub struct GraphStatsResponse {
    pub nodes: usize,
    pub edges: usize,
    pub stops: usize,
    pub lines: usize,
    pub failed_fetches: usize,
}

impl GraphStatsResponse {
    pub fn from_stats(stats: &GraphStats) -> Self {
        Self {
            nodes: stats.nodes,
            edges: stats.edges,
            stops: stats.stops,
            lines: stats.lines,
            failed_fetches: stats.failed_fetches,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
