//! Curve overlay strategy: part of the track traces an artwork outline
//!
//! The working window is projected to planar meters and resampled to a fixed
//! number of points, and the artwork is resampled the same way. Each artwork
//! point is then carried along the window: its x coordinate picks a window
//! segment and the position along it, and its y coordinate becomes a sideways
//! offset scaled by that segment's width. Time and altitude are interpolated
//! back from the original window so the result still climbs and descends
//! like the real flight.

use log::debug;

use crate::artwork::Artwork;
use crate::error::{Error, Result};
use crate::projection::{normalize_latlon, PlanarPoint, UtmProjector};
use crate::track::{split_with_trim, BurstPolicy, TrackBuilder};
use crate::types::{Track, TrackPoint};

/// Resamples a polyline to exactly `n` points
///
/// Shorter polylines are interpolated uniformly by segment index (not by arc
/// length); polylines with `n` or more points are decimated by index, keeping
/// original points.
pub fn resample(points: &[PlanarPoint], n: usize) -> Vec<PlanarPoint> {
    let len = points.len();
    if n == 0 || len == 0 {
        return Vec::new();
    }
    if len >= n {
        return (0..n).map(|i| points[i * len / n]).collect();
    }
    if len == 1 || n == 1 {
        return vec![points[0]; n];
    }

    let last_segment = len - 2;
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64 * (len - 1) as f64;
            let segment = (t.floor() as usize).min(last_segment);
            points[segment].lerp(&points[segment + 1], t - segment as f64)
        })
        .collect()
}

/// Carries the artwork outline along the window polyline
///
/// The artwork's `[0, width]` horizontal span is spread over the window's
/// segments. Points past either end extrapolate from the first or last
/// segment.
pub fn trace_outline(window: &[PlanarPoint], outline: &[PlanarPoint], width: f64) -> Vec<PlanarPoint> {
    let n = window.len();
    if n < 2 {
        return Vec::new();
    }

    let seg_width = width / n as f64;

    outline
        .iter()
        .map(|p| {
            let section = p.x * n as f64 / width;
            let before = (section.floor().max(0.0) as usize).min(n - 2);

            let left = window[before];
            let right = window[before + 1];
            let along = (p.x - before as f64 * seg_width) / seg_width;
            let scale = (right.x - left.x) / seg_width;

            PlanarPoint::new(
                left.x + along * (right.x - left.x),
                left.y + along * (right.y - left.y) - scale * p.y,
            )
        })
        .collect()
}

/// Rebuilds track points for `coords` from the original window's time and
/// altitude progression
///
/// Point `i` of `m` maps to position `i * n / m` in the `n` originals and is
/// linearly interpolated there; times are truncated to whole seconds. Past
/// the last original sample the last time and altitude are held.
pub fn reinterpolate(coords: &[(f64, f64)], original: &[TrackPoint]) -> Track {
    let n = original.len();
    let m = coords.len();
    let mut out = TrackBuilder::with_capacity(m);

    let Some(last) = original.last() else {
        return out.finish();
    };

    for (i, &(lat, lon)) in coords.iter().enumerate() {
        let interp = i as f64 * n as f64 / m as f64;
        let before = interp.floor() as usize;

        if before + 1 >= n {
            out.push(TrackPoint::new(last.time, lat, lon, last.alt));
            continue;
        }

        let partial = interp - before as f64;
        let (a, b) = (&original[before], &original[before + 1]);
        let time = a.time as f64 + (b.time - a.time) as f64 * partial;
        let alt = a.alt + (b.alt - a.alt) * partial;

        out.push(TrackPoint::new(time.trunc() as i64, lat, lon, alt));
    }

    out.finish()
}

/// Reshapes a window to trace an artwork
#[derive(Debug, Clone, Copy)]
pub struct CurveOverlay {
    samples: usize,
}

impl CurveOverlay {
    /// Creates an overlay producing `samples` points per window
    pub fn new(samples: usize) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Returns exactly `samples` points tracing `artwork` along `window`
    pub fn apply(&self, window: &[TrackPoint], artwork: &Artwork) -> Result<Track> {
        if window.len() < 2 {
            return Err(Error::Input(format!(
                "Overlay window needs at least 2 points, got {}",
                window.len()
            )));
        }
        if self.samples < 2 {
            return Err(Error::Input(format!("Overlay needs at least 2 samples, got {}", self.samples)));
        }

        let coords: Vec<(f64, f64)> = window
            .iter()
            .map(|p| normalize_latlon(p.lat, p.lon))
            .collect();

        let (lat0, lon0) = coords[0];
        let projector = UtmProjector::for_point(lat0, lon0)?;
        debug!(
            "overlay in UTM zone {}{}",
            projector.zone(),
            if projector.is_south() { "S" } else { "N" }
        );

        let planar = projector.forward_many(&coords)?;
        let planar = resample(&planar, self.samples);
        let outline = resample(&artwork.outline, self.samples);

        let traced = trace_outline(&planar, &outline, artwork.width);
        let coords = projector.inverse_many(&traced)?;

        Ok(reinterpolate(&coords, window))
    }
}

/// Runs the whole overlay strategy on a track
///
/// Ascent artworks replace the trimmed ascent window, descent artworks the
/// trimmed descent window; prefix and suffix are kept as they are.
pub fn transform(
    track: &[TrackPoint],
    artwork: &Artwork,
    descent: bool,
    samples: usize,
    trim_fraction: f64,
) -> Result<Track> {
    let policy = if descent {
        BurstPolicy::KeepAfterBurst
    } else {
        BurstPolicy::KeepBeforeBurst
    };

    let parts = split_with_trim(track, policy, trim_fraction);
    let traced = CurveOverlay::new(samples).apply(&parts.window, artwork)?;

    let mut out = TrackBuilder::with_capacity(parts.prefix.len() + traced.len() + parts.suffix.len());
    out.extend_from_slice(&parts.prefix);
    out.extend_from_slice(&traced);
    out.extend_from_slice(&parts.suffix);
    Ok(out.finish())
}
