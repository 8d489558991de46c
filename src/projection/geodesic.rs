//! Ellipsoidal distances on WGS84

use geo::{Distance, Geodesic, Point};

use crate::types::TrackPoint;

/// Geodesic distance in meters between two (lat, lon) positions in degrees
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Geodesic::distance(Point::new(lon1, lat1), Point::new(lon2, lat2))
}

/// Running arc length along a track, one entry per point, starting at 0
///
/// The result never decreases, which the trimming bisection relies on.
pub fn cumulative_lengths(track: &[TrackPoint]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(track.len());
    let mut total = 0.0;

    for (i, point) in track.iter().enumerate() {
        if i > 0 {
            let prev = &track[i - 1];
            let step = distance(prev.lat, prev.lon, point.lat, point.lon);
            if step.is_finite() {
                total += step;
            }
        }
        lengths.push(total);
    }

    lengths
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_degree_of_latitude() {
        // A degree of latitude at the equator is ~110.574 km on WGS84
        let d = distance(0.0, 0.0, 1.0, 0.0);
        assert_relative_eq!(d, 110_574.0, max_relative = 1e-4);
    }

    #[test]
    fn test_zero_distance() {
        assert_eq!(distance(51.0, -1.0, 51.0, -1.0), 0.0);
    }

    #[test]
    fn test_cumulative_lengths() {
        let track = vec![
            TrackPoint::new(0, 0.0, 0.0, 0.0),
            TrackPoint::new(1, 0.0, 0.0, 0.0),
            TrackPoint::new(2, 1.0, 0.0, 0.0),
            TrackPoint::new(3, 2.0, 0.0, 0.0),
        ];
        let lengths = cumulative_lengths(&track);

        assert_eq!(lengths.len(), 4);
        assert_eq!(lengths[0], 0.0);
        assert_eq!(lengths[1], 0.0);
        assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
        assert_relative_eq!(lengths[3], distance(0.0, 0.0, 2.0, 0.0), max_relative = 1e-9);
    }

    #[test]
    fn test_cumulative_lengths_empty() {
        assert!(cumulative_lengths(&[]).is_empty());
    }
}
