use crate::body::{Body, BodyState, Dimension};
use crate::constants::{DEFAULT_MIN_SEPARATION, SECONDS_PER_HOUR};
use crate::diagnostics::Diagnostics;
use crate::error::{SimError, SimResult};
use crate::force::ForceModel;
use crate::integrator::{validate_dt, verlet_step};
use glam::DVec3;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Longest run accepted by [`Simulation::run`], in steps
pub const MAX_RUN_STEPS: u64 = 100_000_000;

/// Fraction of a step ignored when turning a duration into a step count,
/// so that durations which are an exact multiple of dt never gain an extra step
const RUN_TOLERANCE: f64 = 1e-9;

/// Numerical settings of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Step length used by [`Simulation::step`] (s)
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Closest approach tolerated before stepping fails (m)
    #[serde(default = "default_min_separation")]
    pub min_separation: f64,
}

fn default_dt() -> f64 {
    SECONDS_PER_HOUR
}

fn default_min_separation() -> f64 {
    DEFAULT_MIN_SEPARATION
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            min_separation: default_min_separation(),
        }
    }
}

/// Immutable record of the system after one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: u64,
    pub time: f64,
    pub bodies: Vec<BodyState>,
    pub diagnostics: Diagnostics,
}

/// Owns a body set and advances it in time, recording every state
#[derive(Debug)]
pub struct Simulation {
    bodies: Vec<Body>,
    forces: ForceModel,
    config: SimulationConfig,
    dimension: Dimension,
    time: f64,
    steps: u64,
    history: Vec<Snapshot>,
}

impl Simulation {
    /// Validate the body set and record the initial snapshot
    pub fn new(bodies: Vec<Body>, config: SimulationConfig) -> SimResult<Self> {
        validate_dt(config.dt)?;
        let forces = ForceModel::new(config.min_separation)?;

        let first = bodies.first().ok_or_else(|| {
            SimError::invalid_body("<none>", "a simulation needs at least one body")
        })?;
        let dimension = first.dimension();

        let mut names = HashSet::new();
        for body in &bodies {
            if body.dimension() != dimension {
                return Err(SimError::invalid_body(
                    body.name(),
                    format!(
                        "has {} components but the body set uses {}",
                        body.dimension().len(),
                        dimension.len()
                    ),
                ));
            }
            if !names.insert(body.name()) {
                return Err(SimError::invalid_body(body.name(), "duplicate body name"));
            }
        }

        forces.check_separations(&bodies)?;

        debug!(
            "Simulation created with {} bodies ({}-D), dt = {} s",
            bodies.len(),
            dimension.len(),
            config.dt
        );

        let mut sim = Self {
            bodies,
            forces,
            config,
            dimension,
            time: 0.0,
            steps: 0,
            history: Vec::new(),
        };
        let initial = sim.capture();
        sim.history.push(initial);
        Ok(sim)
    }

    /// Advance by the configured dt
    pub fn step(&mut self) -> SimResult<&Snapshot> {
        self.step_by(self.config.dt)
    }

    /// Advance by a caller-supplied dt; on error nothing changes
    pub fn step_by(&mut self, dt: f64) -> SimResult<&Snapshot> {
        verlet_step(&mut self.bodies, dt, &self.forces)?;
        self.time += dt;
        self.steps += 1;

        let snapshot = self.capture();
        trace!(
            "step {} t = {:.3e} s E = {:.6e} J",
            snapshot.step,
            snapshot.time,
            snapshot.diagnostics.total
        );
        self.history.push(snapshot);
        Ok(self.latest())
    }

    /// Step with `dt` until at least `duration` more seconds have elapsed.
    ///
    /// The final step may overshoot `duration` by less than one `dt`.
    /// Returns the full history, including snapshots from earlier calls.
    pub fn run(&mut self, duration: f64, dt: f64) -> SimResult<&[Snapshot]> {
        let steps = run_steps(duration, dt)?;
        info!(
            "Running {} steps of {} s ({} s simulated)",
            steps, dt, duration
        );

        let report_every = (steps / 10).max(1);
        for n in 0..steps {
            self.step_by(dt)?;
            if (n + 1) % report_every == 0 {
                info!(
                    "Simulation progress: {:.1}%",
                    (n + 1) as f64 / steps as f64 * 100.0
                );
            }
        }

        Ok(&self.history)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body_index(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name() == name)
    }

    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// The most recent snapshot; the history is never empty
    pub fn latest(&self) -> &Snapshot {
        &self.history[self.history.len() - 1]
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn force_model(&self) -> &ForceModel {
        &self.forces
    }

    /// Relative change of total energy since the initial snapshot
    pub fn energy_drift(&self) -> f64 {
        let initial = self.history[0].diagnostics.total;
        let current = self.latest().diagnostics.total;
        if initial == 0.0 {
            return current - initial;
        }
        (current - initial) / initial.abs()
    }

    /// Recorded positions of one body, one per snapshot
    pub fn trajectory(&self, index: usize) -> Option<Vec<DVec3>> {
        if index >= self.bodies.len() {
            return None;
        }
        Some(
            self.history
                .iter()
                .map(|s| s.bodies[index].position)
                .collect(),
        )
    }

    fn capture(&self) -> Snapshot {
        Snapshot {
            step: self.steps,
            time: self.time,
            bodies: self.bodies.iter().map(Body::state).collect(),
            diagnostics: Diagnostics::evaluate(&self.bodies),
        }
    }
}

/// Number of steps needed to cover `duration` with steps of `dt`
pub fn run_steps(duration: f64, dt: f64) -> SimResult<u64> {
    validate_dt(dt)?;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(SimError::invalid_timestep(format!(
            "run duration must be positive and finite, got {}",
            duration
        )));
    }

    let steps = (duration / dt - RUN_TOLERANCE).ceil();
    if steps > MAX_RUN_STEPS as f64 {
        return Err(SimError::invalid_timestep(format!(
            "duration {} s with dt {} s needs {} steps, more than the limit of {}",
            duration, dt, steps, MAX_RUN_STEPS
        )));
    }
    Ok((steps as u64).max(1))
}
