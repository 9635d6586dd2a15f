pub mod states;
pub mod params;
pub mod error;
pub mod engine;
pub mod pairs;
pub mod forces;
pub mod collisions;
pub mod integrator;
pub mod launch;
pub mod presets;
pub mod scenario;
