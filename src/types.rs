//! Core data types for trackwarp

use serde::{Deserialize, Serialize};

/// One telemetry sample of a flight
///
/// Field order matches the on-disk row layout: time, latitude, longitude,
/// altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Seconds since an arbitrary epoch
    pub time: i64,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Altitude in meters
    pub alt: f64,
}

impl TrackPoint {
    /// Creates a new track point
    pub fn new(time: i64, lat: f64, lon: f64, alt: f64) -> Self {
        Self { time, lat, lon, alt }
    }

    /// Returns true if latitude, longitude and altitude are all finite
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite() && self.alt.is_finite()
    }
}

/// An ordered flight path
pub type Track = Vec<TrackPoint>;

/// A fixed geographic point a strategy can steer toward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// UTM zone number used for planar math around the target
    pub zone: u8,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Human readable identifier, e.g. an airport code
    pub label: String,
}

impl Target {
    /// Creates a new target
    pub fn new(zone: u8, lat: f64, lon: f64, label: &str) -> Self {
        Self {
            zone,
            lat,
            lon,
            label: label.to_string(),
        }
    }

    /// True if the target lies south of the equator
    pub fn is_south(&self) -> bool {
        self.lat < 0.0
    }
}

/// Returns true if timestamps never decrease along the track
pub fn is_time_ordered(track: &[TrackPoint]) -> bool {
    track.windows(2).all(|w| w[0].time <= w[1].time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_point_finite() {
        assert!(TrackPoint::new(0, 51.0, -1.0, 100.0).is_finite());
        assert!(!TrackPoint::new(0, f64::NAN, -1.0, 100.0).is_finite());
        assert!(!TrackPoint::new(0, 51.0, f64::INFINITY, 100.0).is_finite());
    }

    #[test]
    fn test_target_hemisphere() {
        assert!(!Target::new(30, 51.4715, -0.4520, "LHR").is_south());
        assert!(Target::new(56, -33.9461, 151.1772, "SYD").is_south());
    }

    #[test]
    fn test_time_ordered() {
        let track = vec![
            TrackPoint::new(0, 0.0, 0.0, 0.0),
            TrackPoint::new(10, 0.0, 0.0, 0.0),
            TrackPoint::new(10, 0.0, 0.0, 0.0),
        ];
        assert!(is_time_ordered(&track));

        let reversed: Track = track.iter().rev().copied().collect();
        assert!(!is_time_ordered(&reversed));
        assert!(is_time_ordered(&reversed[..2]));
    }
}
