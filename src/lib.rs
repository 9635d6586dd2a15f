pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, BodyId, System, NVec2, CenterOfMass};
pub use simulation::params::{Parameters, REVERSE_COLLISION_FACTOR};
pub use simulation::error::SimError;
pub use simulation::forces::{PairImpulse, ImpulseSet, NewtonianGravity};
pub use simulation::collisions::{absorber, resolve_collisions, Absorber, Absorption};
pub use simulation::integrator::{step, step_n};
pub use simulation::launch::{aim, launch_velocity, LaunchLine, MassEntry};
pub use simulation::scenario::{Scenario, RunSummary};

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, PresetConfig, ScenarioConfig};

pub use benchmark::benchmark::bench_step;
