//! Wire types for transit network data.
//!
//! These DTOs mirror the provider's JSON shapes; conversion functions turn
//! them into validated domain types. The same shapes serve as the format of
//! the mock provider's network description files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::ProviderError;
use crate::domain::{Coordinates, Correspondence, Line, Stop, TransportMode};

/// A stop as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl StopDto {
    /// Convert into the domain type.
    pub fn into_domain(self) -> Stop {
        Stop::new(
            self.id,
            self.name,
            Coordinates::new(self.latitude, self.longitude),
        )
    }
}

/// A line as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDto {
    pub id: String,
    pub name: String,
    pub color: String,
    pub mode: String,
    pub routes: Vec<String>,
}

impl LineDto {
    /// Convert into the domain type.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an unknown mode string or an empty route list.
    pub fn into_domain(self) -> Result<Line, ProviderError> {
        let mode = parse_mode(&self.mode).ok_or_else(|| {
            ProviderError::InvalidData(format!("line {}: unknown mode {:?}", self.id, self.mode))
        })?;

        Line::new(
            self.id.clone(),
            self.name,
            self.color,
            mode,
            self.routes.into_iter().map(Into::into).collect(),
        )
        .map_err(|e| ProviderError::InvalidData(format!("line {}: {e}", self.id)))
    }
}

/// A walking correspondence as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrespondenceDto {
    pub to_stop_id: String,
    pub walk_minutes: f64,
}

impl CorrespondenceDto {
    pub fn into_domain(self) -> Correspondence {
        Correspondence::new(self.to_stop_id, self.walk_minutes)
    }
}

/// A complete network description, as stored in mock network files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkDto {
    pub lines: Vec<LineDto>,

    /// Ordered stop sequence per route id.
    pub routes: HashMap<String, Vec<StopDto>>,

    /// Walking correspondences per stop id.
    #[serde(default)]
    pub correspondences: HashMap<String, Vec<CorrespondenceDto>>,
}

/// Parse a wire mode name. Line modes only; "walking" is not a line mode.
fn parse_mode(s: &str) -> Option<TransportMode> {
    match s.to_ascii_lowercase().as_str() {
        "metro" => Some(TransportMode::Metro),
        "rail" => Some(TransportMode::Rail),
        "tram" => Some(TransportMode::Tram),
        "bus" => Some(TransportMode::Bus),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_conversion() {
        let dto = StopDto {
            id: "S1".into(),
            name: "Gare du Nord".into(),
            latitude: 48.88,
            longitude: 2.355,
        };

        let stop = dto.into_domain();
        assert_eq!(stop.id.as_str(), "S1");
        assert_eq!(stop.name, "Gare du Nord");
        assert_eq!(stop.location.latitude, 48.88);
    }

    #[test]
    fn line_conversion() {
        let dto = LineDto {
            id: "M4".into(),
            name: "Métro 4".into(),
            color: "#BB4D98".into(),
            mode: "Metro".into(),
            routes: vec!["R4a".into(), "R4b".into()],
        };

        let line = dto.into_domain().unwrap();
        assert_eq!(line.id.as_str(), "M4");
        assert_eq!(line.mode, TransportMode::Metro);
        assert_eq!(line.routes().len(), 2);
    }

    #[test]
    fn unknown_mode_rejected() {
        let dto = LineDto {
            id: "X".into(),
            name: "X".into(),
            color: "#000000".into(),
            mode: "zeppelin".into(),
            routes: vec!["R1".into()],
        };

        assert!(matches!(
            dto.into_domain(),
            Err(ProviderError::InvalidData(_))
        ));
    }

    #[test]
    fn empty_routes_rejected() {
        let dto = LineDto {
            id: "X".into(),
            name: "X".into(),
            color: "#000000".into(),
            mode: "bus".into(),
            routes: vec![],
        };

        assert!(matches!(
            dto.into_domain(),
            Err(ProviderError::InvalidData(_))
        ));
    }

    #[test]
    fn network_file_roundtrip() {
        let json = r##"{
            "lines": [
                {"id": "L1", "name": "Line 1", "color": "#FFCD00", "mode": "metro", "routes": ["R1"]}
            ],
            "routes": {
                "R1": [
                    {"id": "A", "name": "Alpha", "latitude": 0.0, "longitude": 0.0},
                    {"id": "B", "name": "Beta", "latitude": 0.0, "longitude": 0.01}
                ]
            },
            "correspondences": {
                "A": [{"to_stop_id": "B", "walk_minutes": 4.0}]
            }
        }"##;

        let network: NetworkDto = serde_json::from_str(json).unwrap();
        assert_eq!(network.lines.len(), 1);
        assert_eq!(network.routes["R1"].len(), 2);
        assert_eq!(network.correspondences["A"][0].walk_minutes, 4.0);
    }

    #[test]
    fn correspondences_field_optional() {
        let json = r#"{"lines": [], "routes": {}}"#;
        let network: NetworkDto = serde_json::from_str(json).unwrap();
        assert!(network.correspondences.is_empty());
    }
}
