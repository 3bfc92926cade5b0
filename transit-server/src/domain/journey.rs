//! Journey result types.
//!
//! A `Journey` is the final itinerary between two stops: an ordered list of
//! ride and walking segments with computed durations. Journeys are created
//! by the planner and never mutated afterwards.

use super::{Coordinates, DomainError, Stop, TransportMode};

/// The kind of a journey segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Riding a line between stops.
    Transit,
    /// Walking between two stations.
    Walking,
}

/// One leg of a journey: either a ride along a line or an interchange walk.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneySegment {
    /// Ride or walk.
    pub kind: SegmentKind,

    /// Mode of transport (`Walking` for walk segments).
    pub mode: TransportMode,

    /// Display name of the line ridden (ride segments only).
    pub line_name: Option<String>,

    /// Display color of the line ridden (ride segments only).
    pub line_color: Option<String>,

    /// First stop of the segment.
    pub origin: Stop,

    /// Last stop of the segment.
    pub destination: Stop,

    /// Stops between origin and destination (ride segments only).
    pub intermediate_stops: Vec<Stop>,

    /// Duration in minutes.
    pub duration_mins: f64,

    /// Ordered coordinates for map rendering.
    pub path: Vec<Coordinates>,
}

impl JourneySegment {
    /// Returns true if this is a ride segment.
    pub fn is_transit(&self) -> bool {
        self.kind == SegmentKind::Transit
    }

    /// Returns true if this is a walking segment.
    pub fn is_walking(&self) -> bool {
        self.kind == SegmentKind::Walking
    }

    /// All stops of the segment in order, boundaries included.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        std::iter::once(&self.origin)
            .chain(self.intermediate_stops.iter())
            .chain(std::iter::once(&self.destination))
    }
}

/// A complete itinerary between an origin and a destination stop.
///
/// # Invariants
///
/// - At least one segment
/// - Consecutive segments connect (destination stop of one = origin stop of
///   the next)
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    segments: Vec<JourneySegment>,
    total_duration_mins: f64,
    walking_duration_mins: f64,
    transfer_count: usize,
}

impl Journey {
    /// Construct a journey from segments and the solver's total cost.
    ///
    /// The total duration is the shortest-path cost, which includes
    /// interchange penalties that no individual segment accounts for.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the segment list is empty or consecutive segments do
    /// not share a boundary stop.
    pub fn new(
        segments: Vec<JourneySegment>,
        total_duration_mins: f64,
    ) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyJourney);
        }

        for window in segments.windows(2) {
            let prev_dest = &window[0].destination.id;
            let next_origin = &window[1].origin.id;
            if prev_dest != next_origin {
                return Err(DomainError::SegmentsNotConnected(
                    prev_dest.clone(),
                    next_origin.clone(),
                ));
            }
        }

        let walking_duration_mins = segments
            .iter()
            .filter(|s| s.is_walking())
            .map(|s| s.duration_mins)
            .sum();

        let ride_count = segments.iter().filter(|s| s.is_transit()).count();
        let transfer_count = ride_count.saturating_sub(1);

        Ok(Self {
            segments,
            total_duration_mins,
            walking_duration_mins,
            transfer_count,
        })
    }

    /// Returns all segments in order.
    pub fn segments(&self) -> &[JourneySegment] {
        &self.segments
    }

    /// Returns the origin stop.
    pub fn origin(&self) -> &Stop {
        // Safe: validated non-empty at construction
        &self.segments.first().unwrap().origin
    }

    /// Returns the destination stop.
    pub fn destination(&self) -> &Stop {
        // Safe: validated non-empty at construction
        &self.segments.last().unwrap().destination
    }

    /// Total duration in minutes, interchange penalties included.
    pub fn total_duration_mins(&self) -> f64 {
        self.total_duration_mins
    }

    /// Total walking time in minutes.
    pub fn walking_duration_mins(&self) -> f64 {
        self.walking_duration_mins
    }

    /// Number of line changes.
    pub fn transfer_count(&self) -> usize {
        self.transfer_count
    }

    /// Returns true if the journey stays on a single line.
    pub fn is_direct(&self) -> bool {
        self.transfer_count == 0 && self.walking_duration_mins == 0.0
    }
}
