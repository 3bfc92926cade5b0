//! Domain types for the transit journey planner.
//!
//! These are the validated core model types. Types enforce their invariants
//! at construction time, so code that receives them can trust their
//! validity.

mod error;
mod journey;
mod line;
mod stop;

pub use error::DomainError;
pub use journey::{Journey, JourneySegment, SegmentKind};
pub use line::{Correspondence, Line, LineId, RouteId, TransportMode};
pub use stop::{Coordinates, Stop, StopId};
