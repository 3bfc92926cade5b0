//! Line and route types.

use std::fmt;

use super::{DomainError, StopId};

/// An opaque line identifier from the transit feed.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(String);

impl LineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LineId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque identifier for one underlying route of a line.
///
/// A line may be backed by several routes (one per direction or branch);
/// each route has its own ordered stop sequence.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RouteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The mode of transport a line (or journey segment) uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Metro,
    Rail,
    Tram,
    Bus,
    Walking,
}

impl TransportMode {
    /// Returns the lowercase wire name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Metro => "metro",
            TransportMode::Rail => "rail",
            TransportMode::Tram => "tram",
            TransportMode::Bus => "bus",
            TransportMode::Walking => "walking",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named transit service with an ordered list of underlying routes.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Stable identifier from the transit feed.
    pub id: LineId,

    /// Display name (e.g. "M1", "RER A").
    pub name: String,

    /// Display color as a hex string (e.g. "#FFCD00").
    pub color: String,

    /// Mode of transport.
    pub mode: TransportMode,

    /// Ordered route ids whose stop sequences make up this line.
    /// Validated non-empty at construction.
    routes: Vec<RouteId>,
}

impl Line {
    /// Create a new line.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `routes` is empty: a line with no routes has no
    /// stop sequence to fetch.
    pub fn new(
        id: impl Into<LineId>,
        name: impl Into<String>,
        color: impl Into<String>,
        mode: TransportMode,
        routes: Vec<RouteId>,
    ) -> Result<Self, DomainError> {
        if routes.is_empty() {
            return Err(DomainError::LineWithoutRoutes);
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            mode,
            routes,
        })
    }

    /// Returns the ordered route ids of this line.
    pub fn routes(&self) -> &[RouteId] {
        &self.routes
    }
}

/// A recorded walking connection from one station to another.
#[derive(Debug, Clone, PartialEq)]
pub struct Correspondence {
    /// The stop this correspondence leads to.
    pub to: StopId,

    /// Walking time in minutes.
    pub walk_minutes: f64,
}

impl Correspondence {
    pub fn new(to: impl Into<StopId>, walk_minutes: f64) -> Self {
        Self {
            to: to.into(),
            walk_minutes,
        }
    }
}
