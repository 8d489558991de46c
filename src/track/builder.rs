use crate::types::{Track, TrackPoint};

/// Append-only track accumulator
///
/// Strategies assemble their output through this instead of mutating the
/// input in place; points can only be added at the end and read back in order.
#[derive(Debug, Clone, Default)]
pub struct TrackBuilder {
    points: Track,
}

impl TrackBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with room for `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Appends one point
    pub fn push(&mut self, point: TrackPoint) {
        self.points.push(point);
    }

    /// Appends every point of a slice, in order
    pub fn extend_from_slice(&mut self, points: &[TrackPoint]) {
        self.points.extend_from_slice(points);
    }

    /// Returns the most recently appended point
    pub fn last(&self) -> Option<&TrackPoint> {
        self.points.last()
    }

    /// Number of points appended so far
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Read-only view of the accumulated points
    pub fn as_slice(&self) -> &[TrackPoint] {
        &self.points
    }

    /// Consumes the builder and returns the track
    pub fn finish(self) -> Track {
        self.points
    }
}

impl Extend<TrackPoint> for TrackBuilder {
    fn extend<I: IntoIterator<Item = TrackPoint>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}
