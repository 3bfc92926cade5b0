//! Great-circle distance on the WGS84 sphere.

use crate::domain::Coordinates;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two coordinates, in kilometres.
pub fn great_circle_km(a: &Coordinates, b: &Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_same_point() {
        let p = Coordinates::new(48.8566, 2.3522);
        assert_eq!(great_circle_km(&p, &p), 0.0);
    }

    #[test]
    fn one_hundredth_degree_of_latitude() {
        // 0.01° of latitude is roughly 1.11 km anywhere on the sphere.
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.01, 0.0);
        let d = great_circle_km(&a, &b);
        assert!((d - 1.112).abs() < 0.01, "got {d}");
    }

    #[test]
    fn paris_to_london() {
        // Notre-Dame to Trafalgar Square, roughly 341 km.
        let paris = Coordinates::new(48.8530, 2.3499);
        let london = Coordinates::new(51.5080, -0.1281);
        let d = great_circle_km(&paris, &london);
        assert!((d - 341.0).abs() < 5.0, "got {d}");
    }
}
