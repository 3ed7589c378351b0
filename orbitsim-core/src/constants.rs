//! Physical constants and reference values, all in SI units.
//!
//! These are read-only for the whole process; nothing in the crate
//! ever rescales them.

use std::f64::consts::PI;

/// Newtonian gravitational constant (m^3 kg^-1 s^-2)
pub const G: f64 = 6.67430e-11;

/// Astronomical unit (m)
pub const AU: f64 = 1.496e11;

pub const SUN_MASS: f64 = 1.989e30;
pub const EARTH_MASS: f64 = 5.972e24;
pub const MOON_MASS: f64 = 7.342e22;

/// Mean Earth-Moon distance (m)
pub const MOON_DISTANCE: f64 = 3.844e8;

pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Closest approach allowed before the force model refuses to continue (m)
pub const DEFAULT_MIN_SEPARATION: f64 = 1.0e6;

/// Speed of a circular orbit of the given radius around a fixed central mass
pub fn circular_speed(central_mass: f64, radius: f64) -> f64 {
    (G * central_mass / radius).sqrt()
}

/// Kepler period T = 2π sqrt(r³ / GM) of a circular orbit
pub fn orbital_period(central_mass: f64, radius: f64) -> f64 {
    2.0 * PI * (radius.powi(3) / (G * central_mass)).sqrt()
}
