//! Great-circle distance between coordinate pairs.
//!
//! [`haversine_km`] is the only notion of "distance" in the crate. The
//! matching engine and every proximity query go through it.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether both components are finite and inside the usual degree ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Haversine distance in kilometres between `from` and `to`.
///
/// Pure and deterministic. NaN inputs propagate NaN; valid inputs always
/// give a finite result, antipodal pairs included.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for near-antipodal pairs.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOLERANCE_KM: f64 = 0.5;

    #[test]
    fn same_point_is_zero() {
        let p = Coordinates::new(28.98, 77.70);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[rstest]
    #[case(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0))]
    #[case(Coordinates::new(51.5074, -0.1278), Coordinates::new(48.8566, 2.3522))]
    #[case(Coordinates::new(-33.86, 151.21), Coordinates::new(35.68, 139.69))]
    fn distance_is_symmetric(#[case] a: Coordinates, #[case] b: Coordinates) {
        assert_eq!(haversine_km(a, b), haversine_km(b, a));
    }

    #[rstest]
    // One degree of latitude.
    #[case(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0), 111.19)]
    // One degree of longitude on the equator.
    #[case(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0), 111.19)]
    // London to Paris.
    #[case(Coordinates::new(51.5074, -0.1278), Coordinates::new(48.8566, 2.3522), 343.56)]
    // Antipodal points on the equator.
    #[case(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0), 20015.09)]
    // Near-antipodal pairs off the equator.
    #[case(Coordinates::new(0.08, 0.0), Coordinates::new(-0.08, -180.0), 20015.09)]
    #[case(Coordinates::new(45.0, 10.0), Coordinates::new(-45.0, -170.0), 20015.09)]
    fn matches_reference_distances(
        #[case] a: Coordinates,
        #[case] b: Coordinates,
        #[case] expected_km: f64,
    ) {
        let d = haversine_km(a, b);
        assert!(d.is_finite(), "expected a finite distance, got {d}");
        assert!(
            (d - expected_km).abs() < TOLERANCE_KM,
            "expected ~{expected_km} km, got {d} km"
        );
    }

    #[test]
    fn nan_propagates() {
        let d = haversine_km(Coordinates::new(f64::NAN, 0.0), Coordinates::new(0.0, 0.0));
        assert!(d.is_nan());
    }

    #[test]
    fn valid_antipodes_are_never_nan() {
        for tenths in -900..=900 {
            let latitude = f64::from(tenths) / 10.0;
            let from = Coordinates::new(latitude, 0.0);
            let to = Coordinates::new(-latitude, -180.0);
            let d = haversine_km(from, to);
            assert!(d.is_finite(), "NaN distance for latitude {latitude}");
        }
    }

    #[rstest]
    #[case(Coordinates::new(90.0, 180.0), true)]
    #[case(Coordinates::new(-90.0, -180.0), true)]
    #[case(Coordinates::new(90.5, 0.0), false)]
    #[case(Coordinates::new(0.0, -180.1), false)]
    #[case(Coordinates::new(f64::NAN, 0.0), false)]
    #[case(Coordinates::new(0.0, f64::INFINITY), false)]
    fn validates_ranges(#[case] c: Coordinates, #[case] valid: bool) {
        assert_eq!(c.is_valid(), valid);
    }
}
