//! Identifier-driven warping of whole tracks

use std::sync::Arc;

use log::{info, warn};

use crate::artwork::{ArtworkLibrary, ArtworkSource};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::metrics::{Metrics, NoopMetrics};
use crate::rng::rng_for;
use crate::strategy::{Collaborators, Strategy};
use crate::targets::{TargetCatalog, TargetResolver};
use crate::types::{Track, TrackPoint};

/// Chooses and runs a strategy for each identifier
///
/// A `Warper` holds no per-call state; it can be shared between threads and
/// called concurrently.
pub struct Warper {
    settings: Settings,
    targets: Arc<dyn TargetResolver>,
    artworks: Arc<dyn ArtworkSource>,
    metrics: Arc<dyn Metrics>,
}

impl Warper {
    /// Creates a warper with collaborators built from the settings: a
    /// [`TargetCatalog`] over `settings.targets`, an [`ArtworkLibrary`]
    /// over `settings.overlay.artwork_dir` and no-op metrics
    pub fn new(settings: Settings) -> Self {
        let targets = Arc::new(TargetCatalog::new(settings.targets.clone()));
        let artworks = Arc::new(ArtworkLibrary::new(&settings.overlay.artwork_dir));

        Self {
            settings,
            targets,
            artworks,
            metrics: Arc::new(NoopMetrics),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_targets(mut self, targets: Arc<dyn TargetResolver>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_artworks(mut self, artworks: Arc<dyn ArtworkSource>) -> Self {
        self.artworks = artworks;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Strategy that `identifier` draws
    pub fn strategy_for(&self, identifier: &str) -> Result<Strategy> {
        Strategy::choose(&self.settings.strategy, &mut rng_for(identifier))
    }

    /// Warps `track` for `identifier`
    ///
    /// The same identifier and track always give the same result. Errors
    /// leave no partial output.
    pub fn warp(&self, identifier: &str, track: &[TrackPoint]) -> Result<Track> {
        if let Some(i) = track.iter().position(|p| !p.is_finite()) {
            return Err(Error::Input(format!("Non-finite coordinates at row {}", i + 1)));
        }

        let mut rng = rng_for(identifier);
        let strategy = Strategy::choose(&self.settings.strategy, &mut rng)?;
        self.metrics.increment(&format!("warp.{}.picked", strategy));
        info!("{}: {} points, strategy {}", identifier, track.len(), strategy);

        let services = Collaborators {
            targets: self.targets.as_ref(),
            artworks: self.artworks.as_ref(),
            metrics: self.metrics.as_ref(),
        };

        strategy.transform(track, &mut rng, &self.settings, &services)
    }

    /// Like [`Warper::warp`] but returns the untouched track on failure
    pub fn warp_or_original(&self, identifier: &str, track: &[TrackPoint]) -> Track {
        match self.warp(identifier, track) {
            Ok(warped) => warped,
            Err(e) => {
                warn!("{}: warp failed, keeping original track: {}", identifier, e);
                self.metrics.increment("warp.failed");
                track.to_vec()
            }
        }
    }
}
