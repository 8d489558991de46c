//! Burst detection and prefix/window/suffix slicing

use log::debug;

use crate::projection::cumulative_lengths;
use crate::types::{Track, TrackPoint};

/// Arc-length fraction trimmed from each end of the window by default
pub const DEFAULT_TRIM_FRACTION: f64 = 0.25;

/// Which side of the burst forms the working window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstPolicy {
    /// Window is the ascent, `[0, burst)`
    KeepBeforeBurst,
    /// Window is the descent, `[burst, len)`
    KeepAfterBurst,
    /// Window is the whole track
    Whole,
}

/// A track cut into an untouched prefix, a working window and an untouched suffix
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplitTrack {
    pub prefix: Track,
    pub window: Track,
    pub suffix: Track,
}

impl SplitTrack {
    /// Total number of points over all three parts
    pub fn len(&self) -> usize {
        self.prefix.len() + self.window.len() + self.suffix.len()
    }

    /// Returns true if all three parts are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates the parts back into one track
    pub fn rejoin(&self) -> Track {
        let mut track = Vec::with_capacity(self.len());
        track.extend_from_slice(&self.prefix);
        track.extend_from_slice(&self.window);
        track.extend_from_slice(&self.suffix);
        track
    }
}

/// Returns the index of the altitude apex
///
/// Each altitude is compared with the immediately preceding one, not with
/// a running maximum. The apex is the point just before the first strict
/// drop, so a single early downward blip ends the ascent early. With no
/// drop at all the last index is returned; an empty track yields 0.
pub fn burst_index(track: &[TrackPoint]) -> usize {
    let Some(first) = track.first() else {
        return 0;
    };

    let mut last_alt = first.alt;
    for (i, point) in track.iter().enumerate() {
        if point.alt < last_alt {
            return i - 1;
        }
        last_alt = point.alt;
    }

    track.len() - 1
}

/// Splits a track around its burst, optionally trimming a quarter of the
/// window's arc length off each end
pub fn split(track: &[TrackPoint], policy: BurstPolicy, trim_quarter: bool) -> SplitTrack {
    let fraction = if trim_quarter { DEFAULT_TRIM_FRACTION } else { 0.0 };
    split_with_trim(track, policy, fraction)
}

/// Splits a track around its burst, trimming `trim_fraction` of the window's
/// arc length from each end
///
/// The start moves forward to the first point whose running length reaches
/// `total * trim_fraction`; the end moves back so that the remaining running
/// length stays within `total * (1 - trim_fraction)`. A window shorter than
/// two points is returned as is; callers decide whether that is an error.
pub fn split_with_trim(track: &[TrackPoint], policy: BurstPolicy, trim_fraction: f64) -> SplitTrack {
    let burst = burst_index(track);

    let (mut start, mut end) = match policy {
        BurstPolicy::KeepBeforeBurst => (0, burst),
        BurstPolicy::KeepAfterBurst => (burst, track.len()),
        BurstPolicy::Whole => (0, track.len()),
    };

    if trim_fraction > 0.0 && end > start {
        let lengths = cumulative_lengths(&track[start..end]);
        let total = lengths.last().copied().unwrap_or(0.0);
        let remove = total * trim_fraction;

        let new_start = start + lengths.partition_point(|&l| l < remove);
        let new_end = end - (lengths.len() - lengths.partition_point(|&l| l <= total - remove));

        debug!(
            "trimmed window [{}, {}) to [{}, {}), arc length {:.1} m",
            start, end, new_start, new_end, total
        );

        start = new_start;
        end = new_end.max(new_start);
    }

    SplitTrack {
        prefix: track[..start].to_vec(),
        window: track[start..end].to_vec(),
        suffix: track[end..].to_vec(),
    }
}
