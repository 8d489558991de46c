//! trackwarp - Deterministic warping of balloon flight paths
//!
//! trackwarp takes a recorded flight path (time, latitude, longitude,
//! altitude) and produces an altered copy of it for a given identifier. The
//! same identifier always yields the same result.
//!
//! Two strategies do the interesting work: a gravity simulation that bends
//! the flight toward a target, and a curve overlay that makes part of the
//! path trace a drawing. Both rely on UTM projection and geodesic arc
//! lengths for their planar math.
//!
//! # Examples
//!
//! ## Warping a track
//!
//! ```no_run
//! use trackwarp::{read_track_file, write_track_file, Settings, Warper};
//!
//! let track = read_track_file("flight_path.csv")?;
//! let warper = Warper::new(Settings::default());
//!
//! let warped = warper.warp_or_original("abc", &track);
//! write_track_file("flight_path_warped.csv", &warped)?;
//! # Ok::<(), trackwarp::Error>(())
//! ```
//!
//! ## Running one strategy directly
//!
//! ```no_run
//! use trackwarp::strategy::gravity::{GravityParams, GravitySimulator};
//! use trackwarp::{read_track_file, split, BurstPolicy, Target};
//!
//! let track = read_track_file("flight_path.csv")?;
//! let parts = split(&track, BurstPolicy::KeepBeforeBurst, true);
//!
//! let target = Target::new(30, 51.4715, -0.4520, "LHR");
//! let approach = GravitySimulator::new(GravityParams::default())
//!     .simulate(&parts.window, &target)?;
//! println!("{} simulated points", approach.len() - parts.window.len());
//! # Ok::<(), trackwarp::Error>(())
//! ```

pub mod error;
pub mod types;
pub mod projection;
pub mod track;
pub mod artwork;
pub mod cache;
pub mod targets;
pub mod metrics;
pub mod rng;
pub mod strategy;
pub mod config;
pub mod pipeline;
pub mod api;

pub use error::{Error, Result};
pub use types::{Target, Track, TrackPoint};
pub use projection::{PlanarPoint, UtmProjector};
pub use track::{
    burst_index, read_track, read_track_file, split, split_with_trim, write_track,
    write_track_file, BurstPolicy, SplitTrack, TrackBuilder,
};
pub use artwork::{Artwork, ArtworkLibrary, ArtworkSource};
pub use targets::{TargetCatalog, TargetResolver};
pub use metrics::{CounterMetrics, Metrics, NoopMetrics};
pub use strategy::{Collaborators, Strategy};
pub use config::Settings;
pub use pipeline::Warper;
