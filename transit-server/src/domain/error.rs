//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from provider/IO errors.

use super::StopId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A line was declared with no underlying routes
    #[error("line must reference at least one route")]
    LineWithoutRoutes,

    /// Journey has no segments
    #[error("journey must have at least one segment")]
    EmptyJourney,

    /// Consecutive journey segments do not share a boundary stop
    #[error("segments do not connect: {0} != {1}")]
    SegmentsNotConnected(StopId, StopId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::LineWithoutRoutes;
        assert_eq!(err.to_string(), "line must reference at least one route");

        let err = DomainError::EmptyJourney;
        assert_eq!(err.to_string(), "journey must have at least one segment");

        let err = DomainError::SegmentsNotConnected(StopId::from("A"), StopId::from("B"));
        assert_eq!(err.to_string(), "segments do not connect: A != B");
    }
}
