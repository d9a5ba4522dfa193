//! Great-circle distance helpers for the nearby search.
//!
//! The db layer prefilters with a latitude/longitude bounding box; the exact
//! haversine distance is computed here and used for the radius cut and the
//! distance-ascending ordering.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude (and of longitude at the equator).
const KM_PER_DEGREE: f64 = 111.0;

/// Haversine distance between two points, in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// A latitude/longitude rectangle guaranteed to contain the circle of
/// `radius_km` around the given point. Intentionally loose: rows inside the
/// box but outside the circle are discarded by the exact haversine check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

pub fn bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE;
    // Longitude degrees shrink with latitude; clamp the cosine away from zero
    // so polar queries degrade to a full longitude sweep instead of dividing
    // by zero.
    let lon_scale = lat.to_radians().cos().max(0.01);
    let lon_delta = (radius_km / (KM_PER_DEGREE * lon_scale)).min(180.0);

    BoundingBox {
        min_lat: (lat - lat_delta).max(-90.0),
        max_lat: (lat + lat_delta).min(90.0),
        min_lon: (lon - lon_delta).max(-180.0),
        max_lon: (lon + lon_delta).min(180.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Paris (48.8566, 2.3522) to London (51.5074, -0.1278).
    #[test]
    fn haversine_paris_to_london() {
        let d = haversine_km(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((d - 343.5).abs() < 1.5, "got {d}");
    }

    #[test]
    fn haversine_zero_for_identical_points() {
        assert_eq!(haversine_km(40.0, -74.0, 40.0, -74.0), 0.0);
    }

    #[test]
    fn haversine_is_symmetric() {
        let ab = haversine_km(35.68, 139.69, 37.77, -122.42);
        let ba = haversine_km(37.77, -122.42, 35.68, 139.69);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_contains_circle_edge_points() {
        let (lat, lon, radius) = (48.8566, 2.3522, 25.0);
        let bb = bounding_box(lat, lon, radius);

        // Walk the circle; every point within the radius must fall inside.
        for step in 0..36 {
            let theta = f64::from(step) * 10f64.to_radians();
            let p_lat = lat + (radius / 111.0) * theta.cos();
            let p_lon = lon + (radius / (111.0 * lat.to_radians().cos())) * theta.sin();
            if haversine_km(lat, lon, p_lat, p_lon) <= radius {
                assert!(p_lat >= bb.min_lat && p_lat <= bb.max_lat);
                assert!(p_lon >= bb.min_lon && p_lon <= bb.max_lon);
            }
        }
    }

    #[test]
    fn bounding_box_clamps_at_poles() {
        let bb = bounding_box(89.9, 0.0, 50.0);
        assert!(bb.max_lat <= 90.0);
        assert!(bb.min_lon >= -180.0 && bb.max_lon <= 180.0);
    }
}
