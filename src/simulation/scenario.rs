//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario`, containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at frame 0)
//! - active impulse set (`ImpulseSet`)
//!
//! `Scenario` is also the surface a front end drives: it ticks (honouring
//! pause), single-steps, resets, clears, and walks a body through the
//! hold / aim / release cycle. All of these run between frames, never inside one.

use std::collections::HashSet;

use log::{debug, info};

use crate::configuration::config::{BodyConfig, EngineConfig, ScenarioConfig};
use crate::simulation::collisions::Absorption;
use crate::simulation::engine::Engine;
use crate::simulation::error::SimError;
use crate::simulation::forces::ImpulseSet;
use crate::simulation::integrator::step;
use crate::simulation::launch::{aim, launch_velocity, LaunchLine, MassEntry};
use crate::simulation::params::Parameters;
use crate::simulation::presets::{build_preset, Bounds};
use crate::simulation::states::{Body, BodyId, CenterOfMass, NVec2, System};

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: usize, // frames actually stepped
    pub absorptions: Vec<Absorption>, // in resolution order
    pub bodies_left: usize,
    pub total_mass: f64, // kg
}

/// Runtime bundle: settings, constants, live set, and impulse terms
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: ImpulseSet,
    held: Option<BodyId>, // body being aimed, unreleased
    mass_entry: MassEntry,
    originals: HashSet<BodyId>, // bodies that survive a reset
}

impl Scenario {
    /// Empty scenario with gravity registered
    pub fn new(parameters: Parameters) -> Result<Self, SimError> {
        parameters.validate()?;
        Ok(Self {
            engine: Engine::default(),
            parameters,
            system: System::new(),
            forces: ImpulseSet::gravity(),
            held: None,
            mass_entry: MassEntry::new(),
            originals: HashSet::new(),
        })
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            density: p_cfg.density,
            mpp: p_cfg.mpp,
            spf: p_cfg.spf,
            collision_factor: p_cfg.collision_factor,
            trail_length: p_cfg.trail_length,
            record_trails: p_cfg.record_trails,
            max_launch_speed: p_cfg.max_launch_speed,
            launch_line_length: p_cfg.launch_line_length,
            vector_display_factor: p_cfg.vector_display_factor,
            gravity_display_factor: p_cfg.gravity_display_factor,
            mass_exponent: p_cfg.mass_exponent,
        };
        parameters.validate()?;

        // Engine (runtime) from EngineConfig
        let bounds = placement_bounds(&cfg.engine)?;
        let engine = Engine::from(cfg.engine);

        // Bodies: preset first, then the explicit list
        let mut bodies = build_preset(&engine.preset, bounds, engine.seed, &parameters)?;
        for bc in &cfg.bodies {
            bodies.push(body_from_config(bc, &parameters)?);
        }

        info!("built scenario from {:?} with {} bodies", engine.preset, bodies.len());

        let system = System::from_bodies(bodies);
        let originals = system.bodies().iter().map(Body::id).collect();
        Ok(Self {
            engine,
            parameters,
            system,
            forces: ImpulseSet::gravity(),
            held: None,
            mass_entry: MassEntry::new(),
            originals,
        })
    }

    /// Step once unless paused. Returns whether a frame ran.
    pub fn tick(&mut self) -> bool {
        if self.engine.paused {
            return false;
        }
        self.step_once();
        true
    }

    /// Step exactly one frame, paused or not
    pub fn step_once(&mut self) -> Vec<Absorption> {
        step(&mut self.system, &self.forces, &self.parameters)
    }

    /// Tick `frames` times and report what happened
    pub fn run(&mut self, frames: usize) -> RunSummary {
        let mut stepped = 0;
        let mut absorptions = Vec::new();
        for _ in 0..frames {
            if self.engine.paused {
                break;
            }
            absorptions.extend(self.step_once());
            stepped += 1;
        }
        RunSummary {
            frames: stepped,
            absorptions,
            bodies_left: self.system.len(),
            total_mass: self.system.total_mass(),
        }
    }

    pub fn pause(&mut self) {
        self.engine.paused = true;
    }

    pub fn resume(&mut self) {
        self.engine.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.engine.paused = !self.engine.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.engine.paused
    }

    /// Put every surviving starting body back to its snapshot and restart the
    /// frame count. Absorbed bodies stay gone, user-launched bodies are dropped.
    pub fn reset(&mut self) {
        let launched: Vec<bool> = self
            .system
            .bodies()
            .iter()
            .map(|b| !self.originals.contains(&b.id()))
            .collect();
        self.system.retain_live(&launched);
        if self.held.is_some_and(|id| !self.originals.contains(&id)) {
            self.held = None;
            self.mass_entry.clear();
        }

        for b in self.system.bodies_mut() {
            b.reset(&self.parameters);
        }
        self.system.frame = 0;
        self.system.t = 0.0;
        info!("reset {} bodies", self.system.len());
    }

    /// Remove every body
    pub fn clear(&mut self) {
        self.system.clear();
        self.originals.clear();
        self.held = None;
        self.mass_entry.clear();
        info!("cleared all bodies");
    }

    /// Add a body to the starting set; it is kept across resets
    pub fn spawn(&mut self, body: Body) -> BodyId {
        let id = self.system.add_body(body);
        self.originals.insert(id);
        id
    }

    /// Place an unreleased body at `position` for the user to aim.
    /// A body still held from before is released in place, at rest.
    pub fn spawn_held(&mut self, position: NVec2, mass: f64, fixed: bool) -> Result<BodyId, SimError> {
        let body = Body::new(position, NVec2::zeros(), mass, &self.parameters)?
            .released(false)
            .fixed(fixed);
        if let Some(prev) = self.held.take() {
            self.set_released(prev, true);
        }
        let id = self.system.add_body(body);
        self.held = Some(id);
        self.mass_entry.clear();
        debug!("holding {:?} at ({:.1}, {:.1})", id, position.x, position.y);
        Ok(id)
    }

    /// Body currently being aimed, if it is still live
    pub fn held(&self) -> Option<BodyId> {
        self.held.filter(|id| self.system.get_body(*id).is_some())
    }

    /// Launch line for the held body with the pointer at `pointer`
    pub fn aim(&self, pointer: NVec2) -> Option<LaunchLine> {
        let body = self.system.get_body(self.held()?)?;
        Some(aim(body.position, pointer, &self.parameters))
    }

    /// Launch the held body away from `pointer`; returns its id
    pub fn release_held(&mut self, pointer: NVec2) -> Option<BodyId> {
        let id = self.held()?;
        self.held = None;
        self.mass_entry.clear();

        let params = &self.parameters;
        let body = self.system.get_body_mut(id)?;
        let velocity = launch_velocity(body.position, pointer, params);
        body.momentum = velocity * body.mass();
        body.released = true;
        debug!("launched {:?} at {:.1} m/s", id, velocity.norm());
        Some(id)
    }

    /// Append a typed digit to the pending mass of the held body
    pub fn type_digit(&mut self, digit: u8) {
        if self.held().is_some() {
            self.mass_entry.push_digit(digit);
        }
    }

    pub fn typed_digits(&self) -> &str {
        self.mass_entry.digits()
    }

    /// Apply the typed mass to the held body; returns the new mass if one was set
    pub fn commit_typed_mass(&mut self) -> Result<Option<f64>, SimError> {
        let Some(id) = self.held() else {
            self.mass_entry.clear();
            return Ok(None);
        };
        let Some(mass) = self.mass_entry.commit(self.parameters.mass_exponent) else {
            return Ok(None);
        };
        self.set_mass(id, mass)?;
        Ok(Some(mass))
    }

    /// Set a body's mass; `Ok(false)` when `id` is not live
    pub fn set_mass(&mut self, id: BodyId, mass: f64) -> Result<bool, SimError> {
        let params = &self.parameters;
        match self.system.get_body_mut(id) {
            Some(b) => b.set_mass(mass, params).map(|_| true),
            None => Ok(false),
        }
    }

    /// Set a body's momentum (kg·m/s); false when `id` is not live
    pub fn set_momentum(&mut self, id: BodyId, momentum: NVec2) -> bool {
        self.with_body(id, |b| b.momentum = momentum)
    }

    /// Set a body's velocity (m/s), stored as momentum
    pub fn set_velocity(&mut self, id: BodyId, velocity: NVec2) -> bool {
        self.with_body(id, |b| b.momentum = velocity * b.mass())
    }

    pub fn set_fixed(&mut self, id: BodyId, fixed: bool) -> bool {
        self.with_body(id, |b| b.fixed = fixed)
    }

    pub fn set_released(&mut self, id: BodyId, released: bool) -> bool {
        self.with_body(id, |b| b.released = released)
    }

    fn with_body(&mut self, id: BodyId, f: impl FnOnce(&mut Body)) -> bool {
        match self.system.get_body_mut(id) {
            Some(b) => {
                f(b);
                true
            }
            None => false,
        }
    }

    pub fn center_of_mass(&self) -> Option<CenterOfMass> {
        self.system.center_of_mass(&self.parameters)
    }
}

fn placement_bounds(e_cfg: &EngineConfig) -> Result<Bounds, SimError> {
    for (name, value) in [("width", e_cfg.width), ("height", e_cfg.height)] {
        if !value.is_finite() || value < 0.0 {
            return Err(SimError::InvalidParameter { name, value });
        }
    }
    Ok(Bounds {
        width: e_cfg.width,
        height: e_cfg.height,
    })
}

fn body_from_config(bc: &BodyConfig, params: &Parameters) -> Result<Body, SimError> {
    let body = Body::with_velocity(NVec2::new(bc.x[0], bc.x[1]), NVec2::new(bc.v[0], bc.v[1]), bc.m, params)?;
    Ok(body.released(bc.released).fixed(bc.fixed))
}
