pub mod body;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod force;
pub mod integrator;
pub mod simulation;

pub use body::{Body, BodyState, Dimension};
pub use diagnostics::Diagnostics;
pub use error::{SimError, SimResult};
pub use force::ForceModel;
pub use integrator::{euler_step, verlet_step};
pub use simulation::{Simulation, SimulationConfig, Snapshot};
