//! Stop identity and location types.

use std::fmt;

/// An opaque stop identifier.
///
/// Stop ids come from the upstream transit feed and have no internal
/// structure we can rely on (e.g. `"stop_area:IDFM:71517"`), so this is a
/// plain newtype rather than a validated code.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(String);

impl StopId {
    /// Create a stop id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StopId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A physical station or platform location.
///
/// Immutable reference data supplied by the data provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Stable identifier from the transit feed.
    pub id: StopId,

    /// Display name.
    pub name: String,

    /// Geographic location.
    pub location: Coordinates,
}

impl Stop {
    /// Create a new stop.
    pub fn new(id: impl Into<StopId>, name: impl Into<String>, location: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }
}

impl From<String> for StopId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_id_display() {
        let id = StopId::from("stop:123");
        assert_eq!(id.as_str(), "stop:123");
        assert_eq!(format!("{}", id), "stop:123");
        assert_eq!(format!("{:?}", id), "StopId(stop:123)");
    }

    #[test]
    fn stop_id_equality_and_hash() {
        use std::collections::HashSet;

        let a = StopId::from("A");
        let b = StopId::from("A");
        let c = StopId::from("B");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn stop_id_ordering() {
        let mut ids = vec![StopId::from("C"), StopId::from("A"), StopId::from("B")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "A");
        assert_eq!(ids[2].as_str(), "C");
    }

    #[test]
    fn stop_construction() {
        let stop = Stop::new("S1", "Châtelet", Coordinates::new(48.858, 2.347));
        assert_eq!(stop.id.as_str(), "S1");
        assert_eq!(stop.name, "Châtelet");
        assert_eq!(stop.location.latitude, 48.858);
    }
}
