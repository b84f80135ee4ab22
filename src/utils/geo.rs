use crate::entities::station::LatLng;

/// Calculate distance between two coordinates using Haversine formula
/// Returns distance in kilometers
pub fn haversine_distance(a: LatLng, b: LatLng) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_rad = a.0.to_radians();
    let lat2_rad = b.0.to_radians();
    let delta_lat = (b.0 - a.0).to_radians();
    let delta_lng = (b.1 - a.1).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Total length of a polyline path in kilometers.
pub fn path_length_km(path: &[LatLng]) -> f64 {
    path.windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .sum()
}

/// Smallest bounding box containing every point, as (south-west, north-east).
/// Returns `None` for an empty path.
pub fn bounds(path: &[LatLng]) -> Option<(LatLng, LatLng)> {
    let first = *path.first()?;
    let mut sw = first;
    let mut ne = first;
    for &(lat, lng) in &path[1..] {
        sw.0 = sw.0.min(lat);
        sw.1 = sw.1.min(lng);
        ne.0 = ne.0.max(lat);
        ne.1 = ne.1.max(lng);
    }
    Some((sw, ne))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_piazza_bole() {
        let piazza = (9.039, 38.748);
        let bole = (8.992, 38.789);

        let distance = haversine_distance(piazza, bole);
        // Roughly 7 km across town
        assert!(distance > 5.0 && distance < 10.0);
    }

    #[test]
    fn test_path_length_sums_segments() {
        let path = [(9.039, 38.748), (9.025, 38.743), (8.992, 38.789)];
        let total = path_length_km(&path);
        let legs = haversine_distance(path[0], path[1]) + haversine_distance(path[1], path[2]);
        assert!((total - legs).abs() < 1e-9);
        assert_eq!(path_length_km(&path[..1]), 0.0);
    }

    #[test]
    fn test_bounds_cover_path() {
        let path = [(9.025, 38.743), (8.992, 38.789), (8.980, 38.799), (9.035, 38.792)];
        let (sw, ne) = bounds(&path).unwrap();
        assert_eq!(sw, (8.980, 38.743));
        assert_eq!(ne, (9.035, 38.799));
        assert!(bounds(&[]).is_none());
    }
}
