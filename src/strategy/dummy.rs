//! Dummy strategy: shifts blocks of points north
//!
//! Useful for exercising the rest of the pipeline; the result is obviously
//! fake when plotted.

use serde::{Deserialize, Serialize};

use crate::types::{Track, TrackPoint};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DummyParams {
    /// Length of one shift cycle in points
    pub period: usize,
    /// Points with `index % period >= shifted` are moved
    pub shifted: usize,
    /// Degrees added to the latitude of moved points
    pub lat_offset: f64,
}

impl Default for DummyParams {
    fn default() -> Self {
        Self {
            period: 20,
            shifted: 10,
            lat_offset: 1.0,
        }
    }
}

/// Applies the shift pattern; time, longitude and altitude are untouched
pub fn transform(track: &[TrackPoint], params: &DummyParams) -> Track {
    let period = params.period.max(1);

    track
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let mut point = *point;
            if i % period >= params.shifted {
                point.lat += params.lat_offset;
            }
            point
        })
        .collect()
}
