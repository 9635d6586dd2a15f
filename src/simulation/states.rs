//! Core state types for the N-body simulation.
//!
//! Defines the 2D body and the live set that owns them:
//! - `Body`   one point mass, positioned in display space (pixels) and carrying
//!            its momentum in physics units (kg·m/s)
//! - `System` the live set, with the frame counter and simulated time `t`
//!
//! Bodies keep mass and radius private so the two can never drift apart.

use std::collections::VecDeque;

use log::warn;
use nalgebra::Vector2;

use crate::simulation::error::{check_mass, SimError};
use crate::simulation::params::Parameters;

pub type NVec2 = Vector2<f64>;

/// Stable handle for a body; never reused within a `System`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    pub position: NVec2, // display space, pixels
    pub momentum: NVec2, // mass * velocity, kg·m/s
    mass: f64, // kg
    radius: f64, // display space, pixels
    pub released: bool, // takes part in gravity and collisions
    pub fixed: bool, // never moves, momentum zeroed every frame
    initial_position: NVec2,
    initial_momentum: NVec2,
    initial_mass: f64,
    trail: VecDeque<NVec2>, // oldest first
    gravity_vectors: Vec<NVec2>, // impulses received this frame, one per pair
}

impl Body {
    /// Create a released, free body. The current state doubles as the reset snapshot.
    pub fn new(position: NVec2, momentum: NVec2, mass: f64, params: &Parameters) -> Result<Self, SimError> {
        let mass = check_mass(mass)?;
        Ok(Self {
            id: BodyId(0),
            position,
            momentum,
            mass,
            radius: params.radius_from_mass(mass),
            released: true,
            fixed: false,
            initial_position: position,
            initial_momentum: momentum,
            initial_mass: mass,
            trail: VecDeque::new(),
            gravity_vectors: Vec::new(),
        })
    }

    /// Create a body from a velocity in m/s instead of a momentum
    pub fn with_velocity(position: NVec2, velocity: NVec2, mass: f64, params: &Parameters) -> Result<Self, SimError> {
        let mass = check_mass(mass)?;
        Self::new(position, velocity * mass, mass, params)
    }

    pub fn released(mut self, released: bool) -> Self {
        self.released = released;
        self
    }

    pub fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn initial_position(&self) -> NVec2 {
        self.initial_position
    }

    pub fn initial_momentum(&self) -> NVec2 {
        self.initial_momentum
    }

    pub fn initial_mass(&self) -> f64 {
        self.initial_mass
    }

    pub fn trail(&self) -> &VecDeque<NVec2> {
        &self.trail
    }

    pub fn gravity_vectors(&self) -> &[NVec2] {
        &self.gravity_vectors
    }

    /// True velocity in m/s
    pub fn velocity(&self) -> NVec2 {
        self.momentum / self.mass
    }

    /// Sets the mass and recomputes the radius. Rejected masses leave the body untouched.
    pub fn set_mass(&mut self, mass: f64, params: &Parameters) -> Result<(), SimError> {
        let mass = check_mass(mass).inspect_err(|e| warn!("body {:?}: {e}", self.id))?;
        self.apply_mass(mass, params);
        Ok(())
    }

    /// Sets the display radius and recomputes the mass from the physics radius
    pub fn set_radius(&mut self, radius: f64, params: &Parameters) -> Result<(), SimError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius(radius));
        }
        let mass = check_mass(params.mass_from_radius(radius))?;
        self.radius = radius;
        self.mass = mass;
        Ok(())
    }

    fn apply_mass(&mut self, mass: f64, params: &Parameters) {
        self.mass = mass;
        self.radius = params.radius_from_mass(mass);
    }

    /// Display-space distance between centers
    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.position - self.position).norm()
    }

    /// Angle (radians) from this body's center to `other`'s center
    pub fn angle_to(&self, other: &Body) -> f64 {
        let d = other.position - self.position;
        d.y.atan2(d.x)
    }

    /// Take over `other`'s momentum and mass
    pub(crate) fn absorb(&mut self, other: &Body, params: &Parameters) {
        self.momentum += other.momentum;
        self.apply_mass(self.mass + other.mass, params);
    }

    pub(crate) fn clear_gravity_vectors(&mut self) {
        self.gravity_vectors.clear();
    }

    pub(crate) fn receive_impulse(&mut self, impulse: NVec2) {
        self.momentum += impulse;
        self.gravity_vectors.push(impulse);
    }

    /// Move one frame forward
    ///
    /// Every body records its pre-update position in the trail. Fixed bodies lose
    /// their momentum and stay put, unreleased bodies are inert.
    pub fn advance(&mut self, params: &Parameters) {
        if params.record_trails {
            self.trail.push_back(self.position);
            if let Some(cap) = params.trail_length {
                while self.trail.len() > cap {
                    self.trail.pop_front();
                }
            }
        } else {
            self.trail.clear();
        }

        if self.fixed {
            self.momentum = NVec2::zeros();
        } else if self.released {
            // momentum / mass = m/s, then meters -> pixels over one frame
            self.position += self.momentum / self.mass / params.mpp * params.spf;
        }
    }

    /// Restore the snapshot taken at creation. Flags are left alone.
    pub fn reset(&mut self, params: &Parameters) {
        self.momentum = self.initial_momentum;
        self.position = self.initial_position;
        self.apply_mass(self.initial_mass, params);
        self.trail.clear();
        self.gravity_vectors.clear();
    }

    /// End point of the velocity line: `vector_display_factor` frames of travel ahead
    pub fn velocity_display_end(&self, params: &Parameters) -> NVec2 {
        let per_frame = (self.velocity() * params.spf).map(|m| params.to_display(m));
        self.position + per_frame * params.vector_display_factor
    }

    /// End points of this frame's gravity lines, scaled for display
    pub fn gravity_display_ends(&self, params: &Parameters) -> Vec<NVec2> {
        self.gravity_vectors
            .iter()
            .map(|g| self.position + g * params.gravity_display_factor)
            .collect()
    }

    /// Sum of this frame's gravity impulses, None when nothing pulled on the body
    pub fn net_gravity(&self) -> Option<NVec2> {
        if self.gravity_vectors.is_empty() {
            return None;
        }
        Some(self.gravity_vectors.iter().fold(NVec2::zeros(), |acc, g| acc + g))
    }
}

/// Aggregate position and size of the whole live set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterOfMass {
    pub position: NVec2, // display space
    pub total_mass: f64, // kg
    pub radius: f64, // display radius of a body holding the total mass
}

#[derive(Debug, Clone, Default)]
pub struct System {
    bodies: Vec<Body>, // live set, insertion order
    next_id: u32,
    pub frame: u64, // frames stepped since the last reset
    pub t: f64, // simulated seconds since the last reset
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a system and hand out ids in the order given
    pub fn from_bodies(bodies: impl IntoIterator<Item = Body>) -> Self {
        let mut sys = Self::new();
        for body in bodies {
            sys.add_body(body);
        }
        sys
    }

    /// Insert a body and return its id
    pub fn add_body(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        self.bodies.push(body);
        id
    }

    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx))
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Drop every body whose slot is marked dead, keeping the order of the rest
    pub(crate) fn retain_live(&mut self, dead: &[bool]) {
        let mut idx = 0;
        self.bodies.retain(|_| {
            let keep = !dead[idx];
            idx += 1;
            keep
        });
    }

    /// Remove all bodies. Ids keep counting up.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.frame = 0;
        self.t = 0.0;
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.momentum)
    }

    /// Mass-weighted mean position of every live body, None when the set is empty
    pub fn center_of_mass(&self, params: &Parameters) -> Option<CenterOfMass> {
        if self.bodies.is_empty() {
            return None;
        }
        let total_mass = self.total_mass();
        let weighted = self
            .bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.position * b.mass);

        Some(CenterOfMass {
            position: weighted / total_mass,
            total_mass,
            radius: params.radius_from_mass(total_mass),
        })
    }
}
