use crate::error::{SimError, SimResult};
use glam::{DVec2, DVec3};
use serde::Serialize;

/// Number of spatial components a simulation works with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dimension {
    Two,
    Three,
}

impl Dimension {
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    pub fn len(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// Position and velocity of one body at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyState {
    pub position: DVec3,
    pub velocity: DVec3,
}

/// A point mass in the simulation.
///
/// Planar bodies are stored as 3-vectors with a zero z component so the
/// force and integration code never branches on dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    mass: f64,
    dimension: Dimension,
    pub(crate) pos: DVec3,
    pub(crate) vel: DVec3,
}

impl Body {
    /// Build a body from raw component slices of length 2 or 3
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        position: &[f64],
        velocity: &[f64],
    ) -> SimResult<Self> {
        let name = name.into();
        if position.len() != velocity.len() {
            return Err(SimError::invalid_body(
                name,
                format!(
                    "position has {} components but velocity has {}",
                    position.len(),
                    velocity.len()
                ),
            ));
        }
        let dimension = Dimension::from_len(position.len()).ok_or_else(|| {
            SimError::invalid_body(
                name.clone(),
                format!("expected 2 or 3 components, got {}", position.len()),
            )
        })?;

        let pos = to_dvec3(position);
        let vel = to_dvec3(velocity);
        Self::checked(name, mass, dimension, pos, vel)
    }

    pub fn planar(
        name: impl Into<String>,
        mass: f64,
        position: DVec2,
        velocity: DVec2,
    ) -> SimResult<Self> {
        Self::checked(
            name.into(),
            mass,
            Dimension::Two,
            position.extend(0.0),
            velocity.extend(0.0),
        )
    }

    pub fn spatial(
        name: impl Into<String>,
        mass: f64,
        position: DVec3,
        velocity: DVec3,
    ) -> SimResult<Self> {
        Self::checked(name.into(), mass, Dimension::Three, position, velocity)
    }

    fn checked(
        name: String,
        mass: f64,
        dimension: Dimension,
        pos: DVec3,
        vel: DVec3,
    ) -> SimResult<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimError::invalid_body(
                name,
                format!("mass must be positive and finite, got {}", mass),
            ));
        }
        if !pos.is_finite() {
            return Err(SimError::invalid_body(name, "position is not finite"));
        }
        if !vel.is_finite() {
            return Err(SimError::invalid_body(name, "velocity is not finite"));
        }
        Ok(Self {
            name,
            mass,
            dimension,
            pos,
            vel,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn position(&self) -> DVec3 {
        self.pos
    }

    pub fn velocity(&self) -> DVec3 {
        self.vel
    }

    pub fn state(&self) -> BodyState {
        BodyState {
            position: self.pos,
            velocity: self.vel,
        }
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// ½ m |v|²
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
    }
}

fn to_dvec3(components: &[f64]) -> DVec3 {
    match components {
        [x, y] => DVec3::new(*x, *y, 0.0),
        [x, y, z] => DVec3::new(*x, *y, *z),
        _ => DVec3::ZERO,
    }
}
