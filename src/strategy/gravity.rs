//! Gravity strategy: the ascent is cut short and the balloon "falls" toward
//! a target along a simulated orbit
//!
//! Integration happens in the target's UTM zone with a fixed step
//! velocity-Verlet scheme. The starting velocity keeps the last real
//! heading, so the approach curves in rather than heading straight at the
//! target.

use log::{debug, info};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projection::UtmProjector;
use crate::targets::TargetResolver;
use crate::track::{burst_index, split_with_trim, BurstPolicy, TrackBuilder};
use crate::types::{Target, Track, TrackPoint};

pub type NVec2 = Vector2<f64>;

/// Per-step velocity loss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Damping {
    /// Velocity is multiplied by `factor` every step
    Fixed { factor: f64 },
    /// Loss shrinks with distance: full `1 - factor` loss at the starting
    /// distance, none at the target
    DistanceScaled { factor: f64 },
}

impl Damping {
    /// The configured factor
    pub fn factor(&self) -> f64 {
        match *self {
            Damping::Fixed { factor } | Damping::DistanceScaled { factor } => factor,
        }
    }

    /// Velocity multiplier at `distance` from the target
    pub fn multiplier(&self, distance: f64, initial_distance: f64) -> f64 {
        match *self {
            Damping::Fixed { factor } => factor,
            Damping::DistanceScaled { factor } => {
                let ratio = if initial_distance > 0.0 {
                    (distance / initial_distance).min(1.0)
                } else {
                    0.0
                };
                1.0 - (1.0 - factor) * ratio
            }
        }
    }
}

/// Physical and numerical parameters of the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityParams {
    /// Attracting strength, G*M in m^3/s^2
    pub attractor: f64,
    /// Repelling strength, G*M in m^3/s^2; keeps the pull finite near the target
    pub repulsor: f64,
    /// Integration step, also the spacing of generated timestamps
    pub time_step_secs: i64,
    /// Simulation stops once this close to the target
    pub threshold_m: f64,
    /// Hard cap on integration steps
    pub max_iterations: usize,
    /// Altitude written on every simulated point
    pub placeholder_alt: f64,
    pub damping: Damping,
}

impl Default for GravityParams {
    fn default() -> Self {
        // G = 6.674e-11 with masses of 1e18 and 1e16 kg
        Self {
            attractor: 6.674e7,
            repulsor: 6.674e5,
            time_step_secs: 10,
            threshold_m: 2000.0,
            max_iterations: 10_000,
            placeholder_alt: 42.0,
            damping: Damping::Fixed { factor: 0.998 },
        }
    }
}

/// Transient state of one simulation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub position: NVec2,
    pub velocity: NVec2,
    pub acceleration: NVec2,
}

/// Integrates a trajectory from the end of a window toward a target
pub struct GravitySimulator {
    params: GravityParams,
}

impl GravitySimulator {
    pub fn new(params: GravityParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GravityParams {
        &self.params
    }

    /// Acceleration at `position` due to the target at `target`
    ///
    /// Inverse-square pull toward the target minus a weaker inverse-square
    /// push away from it. Zero when exactly on the target.
    pub fn acceleration(&self, position: &NVec2, target: &NVec2) -> NVec2 {
        let r = position - target;
        let dist = r.norm();
        if dist == 0.0 {
            return NVec2::zeros();
        }

        let unit = r / dist;
        let dist2 = dist * dist;
        let pull = -unit * (self.params.attractor / dist2);
        let push = unit * (self.params.repulsor / dist2);
        pull + push
    }

    /// Builds the starting state from the window's last two points
    pub fn initial_state(
        &self,
        window: &[TrackPoint],
        projector: &UtmProjector,
        target: &NVec2,
    ) -> Result<SimulationState> {
        let [.., prev, last] = window else {
            return Err(Error::Input(format!(
                "Gravity window needs at least 2 points, got {}",
                window.len()
            )));
        };

        let r: NVec2 = projector.forward(last.lat, last.lon)?.into();
        let r_old: NVec2 = projector.forward(prev.lat, prev.lon)?.into();

        let dt = (last.time - prev.time) as f64;
        if dt == 0.0 {
            return Err(Error::Input(format!("Duplicate timestamp {} at end of window", last.time)));
        }

        let heading = (r - r_old) / dt;
        let norm = heading.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(Error::Input("Window ends without movement; no heading".to_string()));
        }

        let dist = (r - target).norm();
        let speed = if dist > 0.0 {
            (self.params.attractor / dist).sqrt()
        } else {
            0.0
        };

        Ok(SimulationState {
            position: r,
            velocity: heading / norm * speed,
            acceleration: self.acceleration(&r, target),
        })
    }

    /// Advances one velocity-Verlet step, then applies damping
    pub fn step(&self, state: &SimulationState, target: &NVec2, initial_distance: f64) -> SimulationState {
        let dt = self.params.time_step_secs as f64;

        let position = state.position + state.velocity * dt + 0.5 * state.acceleration * dt * dt;
        let acceleration = self.acceleration(&position, target);
        let velocity = state.velocity + 0.5 * dt * (state.acceleration + acceleration);

        let damping = self.params.damping.multiplier((position - target).norm(), initial_distance);

        SimulationState {
            position,
            velocity: velocity * damping,
            acceleration,
        }
    }

    /// Returns the window followed by the simulated approach to `target`
    ///
    /// Simulated points are spaced `time_step_secs` apart and carry the
    /// placeholder altitude. Fails with [`Error::Convergence`] if the target
    /// is not reached within `max_iterations` steps.
    pub fn simulate(&self, window: &[TrackPoint], target: &Target) -> Result<Track> {
        let projector = UtmProjector::new(target.zone, target.is_south())?;
        let r_target: NVec2 = projector.forward(target.lat, target.lon)?.into();

        let mut state = self.initial_state(window, &projector, &r_target)?;
        let initial_distance = (state.position - r_target).norm();

        let mut out = TrackBuilder::with_capacity(window.len() + 256);
        out.extend_from_slice(window);
        let mut time = window[window.len() - 1].time;

        let mut iterations = 0;
        let mut distance = initial_distance;

        while distance >= self.params.threshold_m {
            if iterations >= self.params.max_iterations {
                return Err(Error::Convergence { iterations, distance });
            }

            state = self.step(&state, &r_target, initial_distance);
            distance = (state.position - r_target).norm();
            if !distance.is_finite() {
                return Err(Error::Convergence { iterations, distance });
            }

            time += self.params.time_step_secs;
            let (lat, lon) = projector.inverse(state.position.into())?;
            out.push(TrackPoint::new(time, lat, lon, self.params.placeholder_alt));
            iterations += 1;
        }

        debug!(
            "reached {} after {} steps ({:.0} m -> {:.0} m)",
            target.label, iterations, initial_distance, distance
        );

        Ok(out.finish())
    }
}

/// Runs the whole gravity strategy on a track
///
/// The ascent window (trimmed by `trim_fraction`) is kept, a target is
/// resolved from the apex, and the simulated approach replaces everything
/// after the window.
pub fn transform(
    track: &[TrackPoint],
    params: &GravityParams,
    trim_fraction: f64,
    resolver: &dyn TargetResolver,
) -> Result<Track> {
    if track.len() < 2 {
        return Err(Error::Input(format!("Track needs at least 2 points, got {}", track.len())));
    }

    let apex = track[burst_index(track)];
    let target = resolver.resolve(&apex)?;
    info!("steering toward {}", target.label);

    let parts = split_with_trim(track, BurstPolicy::KeepBeforeBurst, trim_fraction);
    let simulated = GravitySimulator::new(params.clone()).simulate(&parts.window, &target)?;

    let mut out = TrackBuilder::with_capacity(parts.prefix.len() + simulated.len());
    out.extend_from_slice(&parts.prefix);
    out.extend_from_slice(&simulated);
    Ok(out.finish())
}
