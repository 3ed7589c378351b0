//! Scenario files and built-in presets.
//!
//! A scenario is the initial body list plus run parameters. It is read
//! from YAML and handed to the core as plain values:
//!
//! ```yaml
//! name: earth-sun
//! run: { dt: 3600.0, duration: 31557600.0 }
//! min_separation: 1.0e6
//! bodies:
//!   - { name: Sun,   mass: 1.989e30, position: [0, 0],        velocity: [0, 0] }
//!   - { name: Earth, mass: 5.972e24, position: [1.496e11, 0], velocity: [0, 29785] }
//! ```

use anyhow::{Context, Result};
use clap::ValueEnum;
use orbitsim_core::constants::{
    circular_speed, AU, DEFAULT_MIN_SEPARATION, EARTH_MASS, MOON_DISTANCE, MOON_MASS,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SUN_MASS,
};
use orbitsim_core::{Body, SimResult, Simulation, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

const YEAR: f64 = 365.25 * SECONDS_PER_DAY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default = "default_min_separation")]
    pub min_separation: f64,
    pub bodies: Vec<BodyConfig>,
}

/// Step length and run length, both in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mass: f64,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
}

fn default_name() -> String {
    "scenario".to_string()
}

fn default_min_separation() -> f64 {
    DEFAULT_MIN_SEPARATION
}

fn default_dt() -> f64 {
    SECONDS_PER_HOUR
}

fn default_duration() -> f64 {
    YEAR
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            duration: default_duration(),
        }
    }
}

impl BodyConfig {
    fn new(name: &str, mass: f64, position: &[f64], velocity: &[f64]) -> Self {
        Self {
            name: Some(name.to_string()),
            mass,
            position: position.to_vec(),
            velocity: velocity.to_vec(),
        }
    }
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(yaml)?;
        Ok(scenario)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Core bodies in file order; unnamed bodies are called `body-<index>`
    pub fn build_bodies(&self) -> SimResult<Vec<Body>> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let name = b.name.clone().unwrap_or_else(|| format!("body-{}", i));
                Body::new(name, b.mass, &b.position, &b.velocity)
            })
            .collect()
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            dt: self.run.dt,
            min_separation: self.min_separation,
        }
    }

    pub fn build_simulation(&self) -> SimResult<Simulation> {
        Simulation::new(self.build_bodies()?, self.simulation_config())
    }
}

/// Initial conditions shipped with the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Sun and Earth on a circular orbit
    SunEarth,
    /// Sun, Earth and Moon in the plane
    SunEarthMoon,
    /// Sun, Earth, Moon and an inclined Mars-like planet
    #[value(name = "solar-system-3d")]
    SolarSystem3d,
    /// Sun with Mercury, Venus, Earth and Mars
    InnerPlanets,
    /// Sun with Jupiter, Saturn, Uranus and Neptune
    GasGiants,
    /// Earth with the Moon
    EarthMoon,
    /// Two stars with a circumbinary planet
    BinaryStar,
    /// Sun, all eight planets and the Moon
    FullSolarSystem,
}

impl Preset {
    pub fn scenario(self) -> ScenarioConfig {
        let name = self
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_else(default_name);

        let (run, bodies) = match self {
            Self::SunEarth => (
                RunConfig::default(),
                vec![
                    BodyConfig::new("Sun", SUN_MASS, &[0.0, 0.0], &[0.0, 0.0]),
                    BodyConfig::new(
                        "Earth",
                        EARTH_MASS,
                        &[AU, 0.0],
                        &[0.0, circular_speed(SUN_MASS, AU)],
                    ),
                ],
            ),
            Self::SunEarthMoon => {
                let earth_speed = circular_speed(SUN_MASS, AU);
                let moon_speed = circular_speed(EARTH_MASS, MOON_DISTANCE) + earth_speed;
                (
                    RunConfig::default(),
                    vec![
                        BodyConfig::new("Sun", SUN_MASS, &[0.0, 0.0], &[0.0, 0.0]),
                        BodyConfig::new("Earth", EARTH_MASS, &[AU, 0.0], &[0.0, earth_speed]),
                        BodyConfig::new(
                            "Moon",
                            MOON_MASS,
                            &[AU + MOON_DISTANCE, 0.0],
                            &[0.0, moon_speed],
                        ),
                    ],
                )
            }
            Self::SolarSystem3d => {
                let earth_speed = circular_speed(SUN_MASS, AU);
                let moon_speed = circular_speed(EARTH_MASS, MOON_DISTANCE) + earth_speed;
                let mars_distance = 2.5 * AU;
                // Slower than circular, so the orbit is elliptical
                let mars_speed = circular_speed(SUN_MASS, mars_distance) * 0.8;
                (
                    RunConfig {
                        dt: SECONDS_PER_HOUR,
                        duration: 2.0 * YEAR,
                    },
                    vec![
                        BodyConfig::new("Sun", SUN_MASS, &[0.0; 3], &[0.0; 3]),
                        BodyConfig::new(
                            "Earth",
                            EARTH_MASS,
                            &[AU, 0.0, 0.0],
                            &[0.0, earth_speed, 0.0],
                        ),
                        BodyConfig::new(
                            "Moon",
                            MOON_MASS,
                            &[AU + MOON_DISTANCE, 0.0, 0.0],
                            &[0.0, moon_speed, 1000.0],
                        ),
                        BodyConfig::new(
                            "Mars",
                            EARTH_MASS * 0.1,
                            &[mars_distance, 0.0, mars_distance * 0.1],
                            &[0.0, mars_speed, mars_speed * 0.1],
                        ),
                    ],
                )
            }
            Self::InnerPlanets => (
                RunConfig {
                    dt: SECONDS_PER_HOUR,
                    duration: 2.0 * YEAR,
                },
                vec![
                    BodyConfig::new("Sun", SUN_MASS, &[0.0; 3], &[0.0; 3]),
                    BodyConfig::new(
                        "Mercury",
                        EARTH_MASS * 0.055,
                        &[0.39 * AU, 0.0, 0.0],
                        &[0.0, 47_870.0, 0.0],
                    ),
                    BodyConfig::new(
                        "Venus",
                        EARTH_MASS * 0.815,
                        &[0.72 * AU, 0.0, 0.0],
                        &[0.0, 35_020.0, 0.0],
                    ),
                    BodyConfig::new("Earth", EARTH_MASS, &[AU, 0.0, 0.0], &[0.0, 29_780.0, 0.0]),
                    BodyConfig::new(
                        "Mars",
                        EARTH_MASS * 0.107,
                        &[1.52 * AU, 0.0, 0.0],
                        &[0.0, 24_077.0, 0.0],
                    ),
                ],
            ),
            Self::GasGiants => (
                RunConfig {
                    dt: SECONDS_PER_DAY,
                    duration: 165.0 * YEAR,
                },
                vec![
                    BodyConfig::new("Sun", SUN_MASS, &[0.0; 3], &[0.0; 3]),
                    BodyConfig::new(
                        "Jupiter",
                        EARTH_MASS * 317.8,
                        &[5.2 * AU, 0.0, 0.0],
                        &[0.0, 13_070.0, 0.0],
                    ),
                    BodyConfig::new(
                        "Saturn",
                        EARTH_MASS * 95.2,
                        &[9.58 * AU, 0.0, 0.0],
                        &[0.0, 9_680.0, 0.0],
                    ),
                    BodyConfig::new(
                        "Uranus",
                        EARTH_MASS * 14.5,
                        &[19.2 * AU, 0.0, 0.0],
                        &[0.0, 6_800.0, 0.0],
                    ),
                    BodyConfig::new(
                        "Neptune",
                        EARTH_MASS * 17.1,
                        &[30.1 * AU, 0.0, 0.0],
                        &[0.0, 5_430.0, 0.0],
                    ),
                ],
            ),
            Self::EarthMoon => (
                RunConfig {
                    dt: 600.0,
                    duration: 28.0 * SECONDS_PER_DAY,
                },
                vec![
                    BodyConfig::new("Earth", EARTH_MASS, &[0.0; 3], &[0.0; 3]),
                    BodyConfig::new(
                        "Moon",
                        MOON_MASS,
                        &[MOON_DISTANCE, 0.0, 0.0],
                        &[0.0, 1_022.0, 0.0],
                    ),
                ],
            ),
            Self::BinaryStar => (
                RunConfig {
                    dt: SECONDS_PER_HOUR,
                    duration: 3.0 * YEAR,
                },
                vec![
                    BodyConfig::new(
                        "Star 1",
                        SUN_MASS,
                        &[-0.5 * AU, 0.0, 0.0],
                        &[0.0, 15_000.0, 0.0],
                    ),
                    BodyConfig::new(
                        "Star 2",
                        SUN_MASS * 0.8,
                        &[0.5 * AU, 0.0, 0.0],
                        &[0.0, -15_000.0, 0.0],
                    ),
                    BodyConfig::new(
                        "Planet",
                        EARTH_MASS,
                        &[2.0 * AU, 0.0, 0.3 * AU],
                        &[0.0, 12_000.0, 2_000.0],
                    ),
                ],
            ),
            Self::FullSolarSystem => {
                let circular = |name: &str, mass: f64, distance: f64| {
                    BodyConfig::new(
                        name,
                        mass,
                        &[distance, 0.0, 0.0],
                        &[0.0, circular_speed(SUN_MASS, distance), 0.0],
                    )
                };
                let earth_speed = circular_speed(SUN_MASS, AU);
                let moon_speed = circular_speed(EARTH_MASS, MOON_DISTANCE) + earth_speed;
                let mars_distance = 1.52 * AU;
                let mars_speed = circular_speed(SUN_MASS, mars_distance);
                (
                    RunConfig {
                        dt: SECONDS_PER_HOUR,
                        duration: 12.0 * YEAR,
                    },
                    vec![
                        BodyConfig::new("Sun", SUN_MASS, &[0.0; 3], &[0.0; 3]),
                        circular("Mercury", EARTH_MASS * 0.055, 0.39 * AU),
                        circular("Venus", EARTH_MASS * 0.815, 0.72 * AU),
                        circular("Earth", EARTH_MASS, AU),
                        BodyConfig::new(
                            "Moon",
                            MOON_MASS,
                            &[AU + MOON_DISTANCE, 0.0, 0.0],
                            &[0.0, moon_speed, 2000.0],
                        ),
                        BodyConfig::new(
                            "Mars",
                            EARTH_MASS * 0.107,
                            &[mars_distance, 0.0, mars_distance * 0.05],
                            &[0.0, mars_speed, mars_speed * 0.05],
                        ),
                        circular("Jupiter", EARTH_MASS * 317.8, 5.2 * AU),
                        circular("Saturn", EARTH_MASS * 95.2, 9.58 * AU),
                        circular("Uranus", EARTH_MASS * 14.5, 19.2 * AU),
                        circular("Neptune", EARTH_MASS * 17.1, 30.1 * AU),
                    ],
                )
            }
        };

        ScenarioConfig {
            name,
            run,
            min_separation: DEFAULT_MIN_SEPARATION,
            bodies,
        }
    }
}
