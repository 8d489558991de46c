use nalgebra::Vector2;

/// A point in a projected (planar) reference frame, in meters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    /// Creates a new planar point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &PlanarPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation toward `other`; `t = 0` yields `self`
    pub fn lerp(&self, other: &PlanarPoint, t: f64) -> PlanarPoint {
        PlanarPoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Returns this point translated so that `origin` becomes (0, 0)
    pub fn relative_to(&self, origin: &PlanarPoint) -> PlanarPoint {
        PlanarPoint::new(self.x - origin.x, self.y - origin.y)
    }
}

impl From<Vector2<f64>> for PlanarPoint {
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<PlanarPoint> for Vector2<f64> {
    fn from(p: PlanarPoint) -> Self {
        Vector2::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = PlanarPoint::new(0.0, 0.0);
        let b = PlanarPoint::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_lerp_and_translate() {
        let a = PlanarPoint::new(10.0, 10.0);
        let b = PlanarPoint::new(20.0, 30.0);
        assert_eq!(a.lerp(&b, 0.5), PlanarPoint::new(15.0, 20.0));
        assert_eq!(b.relative_to(&a), PlanarPoint::new(10.0, 20.0));
    }
}
