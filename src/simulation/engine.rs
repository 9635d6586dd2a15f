//! High-level runtime engine settings
//!
//! Run length, pause state, and the preset/seed a `Scenario` was built from

use crate::configuration::config::{EngineConfig, PresetConfig};

#[derive(Debug, Clone)]
pub struct Engine {
    pub frames: usize, // frames to run when headless
    pub paused: bool, // true = `tick` does nothing
    pub preset: PresetConfig, // what the scenario started from
    pub seed: u64, // random preset seed
}

impl From<EngineConfig> for Engine {
    fn from(cfg: EngineConfig) -> Self {
        Self {
            frames: cfg.frames,
            paused: cfg.paused,
            preset: cfg.preset,
            seed: cfg.seed,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineConfig::default().into()
    }
}
