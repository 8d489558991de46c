//! Target resolution for the gravity strategy

use log::debug;

use crate::error::{Error, Result};
use crate::projection::distance;
use crate::types::{Target, TrackPoint};

/// Resolves the target a track should be steered toward
pub trait TargetResolver: Send + Sync {
    /// Returns a target for the track's apex; failures are [`Error::ExternalLookup`]
    fn resolve(&self, apex: &TrackPoint) -> Result<Target>;
}

/// Fixed list of targets, resolved by geodesic proximity
#[derive(Debug, Clone, Default)]
pub struct TargetCatalog {
    targets: Vec<Target>,
}

impl TargetCatalog {
    /// Creates a catalog from a list of targets
    pub fn new(targets: Vec<Target>) -> Self {
        Self { targets }
    }

    /// Returns all targets in the catalog
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }
}

impl TargetResolver for TargetCatalog {
    fn resolve(&self, apex: &TrackPoint) -> Result<Target> {
        if !apex.lat.is_finite() || !apex.lon.is_finite() {
            return Err(Error::ExternalLookup(format!(
                "cannot resolve a target for ({}, {})",
                apex.lat, apex.lon
            )));
        }

        let (target, dist) = self.targets
            .iter()
            .map(|t| (t, distance(apex.lat, apex.lon, t.lat, t.lon)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| Error::ExternalLookup("target catalog is empty".to_string()))?;

        debug!("nearest target {} at {:.0} m", target.label, dist);
        Ok(target.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TargetCatalog {
        TargetCatalog::new(vec![
            Target::new(30, 51.4715, -0.4520, "LHR"),
            Target::new(31, 49.0097, 2.5479, "CDG"),
            Target::new(32, 50.0379, 8.5622, "FRA"),
        ])
    }

    #[test]
    fn test_nearest_target() {
        let apex = TrackPoint::new(0, 52.2, 0.1, 30_000.0);
        assert_eq!(catalog().resolve(&apex).unwrap().label, "LHR");

        let apex = TrackPoint::new(0, 49.5, 7.0, 30_000.0);
        assert_eq!(catalog().resolve(&apex).unwrap().label, "FRA");
    }

    #[test]
    fn test_empty_catalog() {
        let apex = TrackPoint::new(0, 52.2, 0.1, 30_000.0);
        let err = TargetCatalog::default().resolve(&apex).unwrap_err();
        assert!(matches!(err, Error::ExternalLookup(_)));
    }

    #[test]
    fn test_non_finite_apex() {
        let apex = TrackPoint::new(0, f64::NAN, 0.1, 30_000.0);
        assert!(matches!(catalog().resolve(&apex), Err(Error::ExternalLookup(_))));
    }
}
