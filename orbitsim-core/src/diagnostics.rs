//! Conserved quantities used to check that a run is physically sound.
//!
//! Angular momentum is always taken about the global origin, never the
//! barycenter. For planar simulations only its z component is non-zero.

use crate::body::Body;
use crate::constants::G;
use glam::DVec3;
use serde::Serialize;

/// Energy and angular momentum of a body set at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Diagnostics {
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
    pub angular_momentum: DVec3,
}

impl Diagnostics {
    pub fn evaluate(bodies: &[Body]) -> Self {
        let kinetic = kinetic_energy(bodies);
        let potential = potential_energy(bodies);
        Self {
            kinetic,
            potential,
            total: kinetic + potential,
            angular_momentum: angular_momentum(bodies),
        }
    }

    pub fn angular_momentum_magnitude(&self) -> f64 {
        self.angular_momentum.length()
    }

    /// The scalar angular momentum of a planar system
    pub fn angular_momentum_z(&self) -> f64 {
        self.angular_momentum.z
    }
}

/// Σ ½ m |v|²
pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Σ over unordered pairs of −G m_i m_j / d_ij, each pair counted once.
///
/// Coincident bodies give `-inf`. Bodies held by a [`crate::Simulation`]
/// never are; other callers can guard with
/// [`crate::ForceModel::check_separations`].
pub fn potential_energy(bodies: &[Body]) -> f64 {
    let mut pe = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            pe -= G * a.mass() * b.mass() / a.position().distance(b.position());
        }
    }
    pe
}

/// Σ m (x × v) about the origin
pub fn angular_momentum(bodies: &[Body]) -> DVec3 {
    bodies.iter().map(body_angular_momentum).sum()
}

pub fn body_angular_momentum(body: &Body) -> DVec3 {
    body.mass() * body.position().cross(body.velocity())
}

/// Kinetic energy of one body plus its potential energy with every other body.
///
/// Summing this over all bodies counts each pair twice, so it is a per-body
/// read-out and not a decomposition of the total. Like [`potential_energy`]
/// it assumes no two bodies coincide.
pub fn orbital_energy(bodies: &[Body], index: usize) -> Option<f64> {
    let body = bodies.get(index)?;
    let potential: f64 = bodies
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(_, other)| {
            -G * body.mass() * other.mass() / body.position().distance(other.position())
        })
        .sum();
    Some(body.kinetic_energy() + potential)
}

/// Mass-weighted mean position, or `None` for an empty set
pub fn barycenter(bodies: &[Body]) -> Option<DVec3> {
    let total_mass: f64 = bodies.iter().map(Body::mass).sum();
    if bodies.is_empty() {
        return None;
    }
    let weighted: DVec3 = bodies.iter().map(|b| b.mass() * b.position()).sum();
    Some(weighted / total_mass)
}

/// Σ m v
pub fn total_momentum(bodies: &[Body]) -> DVec3 {
    bodies.iter().map(|b| b.mass() * b.velocity()).sum()
}
