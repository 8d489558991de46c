//! Path transformation strategies
//!
//! Every strategy takes a whole track and returns a whole new one; it either
//! succeeds completely or fails without a partial result.

pub mod dummy;
pub mod gravity;
pub mod overlay;

use std::fmt;

use log::info;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::artwork::ArtworkSource;
use crate::config::{Settings, StrategyWeights};
use crate::error::{Error, Result};
use crate::metrics::Metrics;
use crate::targets::TargetResolver;
use crate::types::{Track, TrackPoint};

pub use dummy::DummyParams;
pub use gravity::{Damping, GravityParams, GravitySimulator, SimulationState};
pub use overlay::{resample, CurveOverlay};

/// Services the strategies call out to
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub targets: &'a dyn TargetResolver,
    pub artworks: &'a dyn ArtworkSource,
    pub metrics: &'a dyn Metrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Dummy,
    Gravity,
    Overlay,
}

impl Strategy {
    /// All strategies, in the order their weights are drawn
    pub const ALL: [Strategy; 3] = [Strategy::Dummy, Strategy::Gravity, Strategy::Overlay];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Dummy => "dummy",
            Strategy::Gravity => "gravity",
            Strategy::Overlay => "overlay",
        }
    }

    /// Draws a strategy according to the configured weights
    pub fn choose<R: Rng + ?Sized>(weights: &StrategyWeights, rng: &mut R) -> Result<Strategy> {
        let dist = WeightedIndex::new([weights.dummy, weights.gravity, weights.overlay])
            .map_err(|e| Error::Config(format!("Invalid strategy weights: {}", e)))?;
        Ok(Self::ALL[dist.sample(rng)])
    }

    /// Transforms `track`, drawing any further choices from `rng`
    pub fn transform<R: Rng + ?Sized>(
        &self,
        track: &[TrackPoint],
        rng: &mut R,
        settings: &Settings,
        services: &Collaborators<'_>,
    ) -> Result<Track> {
        let trim = settings.split.trim_fraction;

        match self {
            Strategy::Dummy => Ok(dummy::transform(track, &settings.dummy)),
            Strategy::Gravity => gravity::transform(track, &settings.gravity, trim, services.targets),
            Strategy::Overlay => {
                let entry = settings
                    .artworks
                    .choose(rng)
                    .ok_or_else(|| Error::artwork("", "artwork catalogue is empty"))?;
                services.metrics.increment(&format!("warp.overlay.{}", entry.stem()));
                info!("tracing {} ({})", entry.name, if entry.descent { "descent" } else { "ascent" });

                let artwork = services.artworks.load(&entry.name)?;
                overlay::transform(track, &artwork, entry.descent, settings.overlay.samples, trim)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
