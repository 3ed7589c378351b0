use crate::body::Body;
use crate::constants::{DEFAULT_MIN_SEPARATION, G};
use crate::error::{SimError, SimResult};
use glam::DVec3;

/// Newtonian point-mass gravity between every pair of bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    min_separation: f64,
}

impl Default for ForceModel {
    fn default() -> Self {
        Self {
            min_separation: DEFAULT_MIN_SEPARATION,
        }
    }
}

impl ForceModel {
    pub fn new(min_separation: f64) -> SimResult<Self> {
        if !min_separation.is_finite() || min_separation <= 0.0 {
            return Err(SimError::invalid_config(format!(
                "minimum separation must be positive and finite, got {}",
                min_separation
            )));
        }
        Ok(Self { min_separation })
    }

    pub fn min_separation(&self) -> f64 {
        self.min_separation
    }

    /// Gravitational force exerted on `a` by `b`.
    ///
    /// Swapping the arguments yields exactly the negated vector: the
    /// displacement flips sign and the magnitude only depends on the
    /// product of the masses and the squared distance.
    pub fn pair_force(&self, a: &Body, b: &Body) -> SimResult<DVec3> {
        let r = b.pos - a.pos;
        let dist = self.checked_distance(a, b, r)?;
        let magnitude = G * (a.mass() * b.mass()) / (dist * dist);
        Ok(r / dist * magnitude)
    }

    /// Net acceleration of every body, in input order
    pub fn accelerations(&self, bodies: &[Body]) -> SimResult<Vec<DVec3>> {
        let mut accel = vec![DVec3::ZERO; bodies.len()];

        for (i, a) in bodies.iter().enumerate() {
            for (j, b) in bodies.iter().enumerate().skip(i + 1) {
                let force = self.pair_force(a, b)?;
                accel[i] += force / a.mass();
                accel[j] -= force / b.mass();
            }
        }

        Ok(accel)
    }

    /// Fails with a singularity error for the first pair closer than the threshold
    pub fn check_separations(&self, bodies: &[Body]) -> SimResult<()> {
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                self.checked_distance(a, b, b.pos - a.pos)?;
            }
        }
        Ok(())
    }

    fn checked_distance(&self, a: &Body, b: &Body, r: DVec3) -> SimResult<f64> {
        let dist = r.length();
        // NaN compares false, so test the valid range rather than the invalid one
        if !(dist >= self.min_separation) {
            return Err(SimError::Singularity {
                first: a.name().to_string(),
                second: b.name().to_string(),
                separation: dist,
                threshold: self.min_separation,
            });
        }
        Ok(dist)
    }
}
