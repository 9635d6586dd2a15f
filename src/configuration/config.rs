//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – run options (frame count, preset, seed, start paused)
//! - [`ParametersConfig`] – physical constants and display/launch scaling
//! - [`BodyConfig`]       – extra bodies added after the preset
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every field except `bodies[*].x` and `bodies[*].m` has a default:
//!
//! ```yaml
//! engine:
//!   frames: 600             # frames to run headless
//!   preset:
//!     kind: circular_orbit  # none | random | circular_orbit | oscillation
//!   seed: 42                # seeds the random preset
//!   paused: false
//!   width: 800.0            # preset placement area, pixels
//!   height: 800.0
//!
//! parameters:
//!   G: 6.67408e-11          # gravitational constant
//!   density: 5514.0         # kg/m^3
//!   mpp: 1.0e6              # meters per pixel
//!   spf: 3600.0             # seconds per frame
//!   collision_factor: 0.6
//!   trail_length: 200       # null -> unbounded
//!   max_launch_speed: 3000.0
//!
//! bodies:
//!   - x: [ 100.0, 100.0 ]   # pixels
//!     v: [ 0.0, 500.0 ]     # m/s
//!     m: 6.0e24             # kg
//!     fixed: false
//! ```
//!
//! The engine maps this configuration into its runtime [`Scenario`](crate::Scenario).

use serde::Deserialize;

use crate::simulation::params::Parameters;

/// Starting configuration placed before any `bodies` entries
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresetConfig {
    #[default]
    None, // empty space

    Random {
        #[serde(default = "default_random_count")]
        count: usize,
    }, // bodies at rest scattered over the window

    CircularOrbit, // fixed Earth with an orbiting Moon

    Oscillation, // bob between two fixed anchors
}

fn default_random_count() -> usize {
    120
}

/// Run-level configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub frames: usize, // frames to run when headless
    pub preset: PresetConfig, // initial bodies
    pub seed: u64, // deterministic seed for the random preset
    pub paused: bool, // start paused
    pub width: f64, // preset placement width, pixels
    pub height: f64, // preset placement height, pixels
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            preset: PresetConfig::None,
            seed: 42,
            paused: false,
            width: 800.0,
            height: 800.0,
        }
    }
}

/// Physical constants and scaling for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    pub density: f64, // kg/m^3
    pub mpp: f64, // meters per pixel
    pub spf: f64, // seconds per frame
    pub collision_factor: f64, // overlap tolerance on the smaller body
    pub trail_length: Option<usize>, // null = unbounded
    pub record_trails: bool,
    pub max_launch_speed: f64, // m/s
    pub launch_line_length: f64, // pixels
    pub vector_display_factor: f64,
    pub gravity_display_factor: f64,
    pub mass_exponent: i32, // typed masses are scaled by 10^mass_exponent
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            G: p.G,
            density: p.density,
            mpp: p.mpp,
            spf: p.spf,
            collision_factor: p.collision_factor,
            trail_length: p.trail_length,
            record_trails: p.record_trails,
            max_launch_speed: p.max_launch_speed,
            launch_line_length: p.launch_line_length,
            vector_display_factor: p.vector_display_factor,
            gravity_display_factor: p.gravity_display_factor,
            mass_exponent: p.mass_exponent,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // position, pixels
    #[serde(default)]
    pub v: [f64; 2], // velocity, m/s
    pub m: f64, // mass, kg
    #[serde(default)]
    pub fixed: bool,
    #[serde(default = "default_released")]
    pub released: bool,
}

fn default_released() -> bool {
    true
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // run options and preset
    #[serde(default)]
    pub parameters: ParametersConfig, // physical constants and scaling
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // extra bodies after the preset
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
