use super::types::GeoPoint;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points (haversine formula).
///
/// Out-of-range input produces a meaningless number, never a panic.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NYC: GeoPoint = GeoPoint {
        latitude: 40.7128,
        longitude: -74.0060,
    };
    const LA: GeoPoint = GeoPoint {
        latitude: 34.0522,
        longitude: -118.2437,
    };

    #[test]
    fn same_point_is_zero() {
        assert_eq!(haversine_km(NYC, NYC), 0.0);
    }

    #[test]
    fn nyc_to_la() {
        let d = haversine_km(NYC, LA);
        assert!((d - 3936.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = haversine_km(NYC, LA);
        let b = haversine_km(LA, NYC);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn garbage_in_does_not_panic() {
        let d = haversine_km(GeoPoint::new(f64::NAN, 500.0), NYC);
        assert!(d.is_nan());
        let d = haversine_km(GeoPoint::new(1000.0, -999.0), NYC);
        assert!(d.is_finite());
    }
}
