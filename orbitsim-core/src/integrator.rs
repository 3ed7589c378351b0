//! Fixed-step time integrators.
//!
//! Both steppers work on a scratch copy of the body states and only
//! write back once every force evaluation has succeeded and the new
//! state is finite, so a failed step leaves the bodies exactly as they were.

use crate::body::Body;
use crate::error::{SimError, SimResult};
use crate::force::ForceModel;
use glam::DVec3;

/// Advance all bodies by `dt` seconds using velocity-Verlet.
///
/// x(t+dt) = x + v dt + ½ a(t) dt²
/// v(t+dt) = v + ½ (a(t) + a(t+dt)) dt
pub fn verlet_step(bodies: &mut [Body], dt: f64, forces: &ForceModel) -> SimResult<()> {
    validate_dt(dt)?;

    let a_old = forces.accelerations(bodies)?;

    // Every new position comes from the old state before any velocity changes
    let mut next: Vec<Body> = bodies.to_vec();
    for ((b, a), old) in next.iter_mut().zip(&a_old).zip(bodies.iter()) {
        b.pos = old.pos + old.vel * dt + 0.5 * *a * dt * dt;
    }
    check_finite(&next, dt)?;

    let a_new = forces.accelerations(&next)?;

    for ((b, old), (a0, a1)) in next
        .iter_mut()
        .zip(bodies.iter())
        .zip(a_old.iter().zip(&a_new))
    {
        b.vel = old.vel + 0.5 * (*a0 + *a1) * dt;
    }
    check_finite(&next, dt)?;

    commit(bodies, &next);
    Ok(())
}

/// Advance all bodies by `dt` seconds using explicit forward Euler.
///
/// Kept as a baseline: it drifts energy systematically and is never
/// used by [`crate::simulation::Simulation`].
pub fn euler_step(bodies: &mut [Body], dt: f64, forces: &ForceModel) -> SimResult<()> {
    validate_dt(dt)?;

    let accelerations: Vec<DVec3> = forces.accelerations(bodies)?;

    // x += v dt and v += a dt, both from the state at t
    let mut next: Vec<Body> = bodies.to_vec();
    for (particle, a) in next.iter_mut().zip(&accelerations) {
        particle.pos += particle.vel * dt;
        particle.vel += *a * dt;
    }
    check_finite(&next, dt)?;

    commit(bodies, &next);
    Ok(())
}

pub(crate) fn validate_dt(dt: f64) -> SimResult<()> {
    if !dt.is_finite() {
        return Err(SimError::invalid_timestep(format!(
            "dt must be finite, got {}",
            dt
        )));
    }
    if dt <= 0.0 {
        return Err(SimError::invalid_timestep(format!(
            "dt must be positive, got {}",
            dt
        )));
    }
    Ok(())
}

/// A step too long for the current state overflows instead of failing a
/// force evaluation; reject it before anything is written back.
fn check_finite(next: &[Body], dt: f64) -> SimResult<()> {
    match next
        .iter()
        .find(|b| !b.pos.is_finite() || !b.vel.is_finite())
    {
        Some(b) => Err(SimError::invalid_timestep(format!(
            "dt {} s drives '{}' to a non-finite state",
            dt,
            b.name()
        ))),
        None => Ok(()),
    }
}

fn commit(bodies: &mut [Body], next: &[Body]) {
    for (b, n) in bodies.iter_mut().zip(next) {
        b.pos = n.pos;
        b.vel = n.vel;
    }
}
