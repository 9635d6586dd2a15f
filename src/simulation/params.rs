//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the runtime constants every step depends on:
//! - gravitational constant and body density (`G`, `density`),
//! - the display/physics bridge (`mpp` meters per pixel, `spf` seconds per frame),
//! - collision tolerance and trail bookkeeping,
//! - launch and display scaling used by the interactive layer
//!
//! One record is owned per scenario, so independent simulations never share state.

use std::f64::consts::PI;

use crate::simulation::error::SimError;

/// Tolerance applied to the first body's radius when the second body of a pair
/// is checked as the absorber. Fixed, unlike `collision_factor`.
pub const REVERSE_COLLISION_FACTOR: f64 = 0.5;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub density: f64, // kg/m^3, shared by every body
    pub mpp: f64, // meters per pixel
    pub spf: f64, // seconds per frame
    pub collision_factor: f64, // share of the smaller radius that may overlap before absorbing
    pub trail_length: Option<usize>, // trail cap, None = unbounded
    pub record_trails: bool, // false drops trails every frame
    pub max_launch_speed: f64, // m/s at a full-length launch line
    pub launch_line_length: f64, // pixels
    pub vector_display_factor: f64, // velocity line length in frames of travel
    pub gravity_display_factor: f64, // share of an impulse drawn on screen
    pub mass_exponent: i32, // typed masses are digits * 10^mass_exponent kg
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: 6.67408e-11,
            density: 5514.0,
            mpp: 1.0e6,
            spf: 3600.0,
            collision_factor: 0.6,
            trail_length: Some(200),
            record_trails: true,
            max_launch_speed: 3000.0,
            launch_line_length: 300.0,
            vector_display_factor: 3.0,
            gravity_display_factor: 4.0e-23,
            mass_exponent: 24,
        }
    }
}

impl Parameters {
    /// Reject constants that would make the unit bridge or the radius formula undefined
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = [
            ("density", self.density),
            ("mpp", self.mpp),
            ("spf", self.spf),
            ("launch_line_length", self.launch_line_length),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidParameter { name, value });
            }
        }

        let non_negative = [
            ("G", self.G),
            ("collision_factor", self.collision_factor),
            ("max_launch_speed", self.max_launch_speed),
            ("vector_display_factor", self.vector_display_factor),
            ("gravity_display_factor", self.gravity_display_factor),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidParameter { name, value });
            }
        }

        if self.trail_length == Some(0) {
            return Err(SimError::InvalidParameter { name: "trail_length", value: 0.0 });
        }

        Ok(())
    }

    /// Display-space radius (pixels) of a sphere of `mass` kg at the configured density
    pub fn radius_from_mass(&self, mass: f64) -> f64 {
        let volume = mass / self.density;
        let physics_radius = (3.0 * volume / (4.0 * PI)).cbrt();
        physics_radius / self.mpp
    }

    /// Mass (kg) of a sphere whose display-space radius is `radius` pixels
    pub fn mass_from_radius(&self, radius: f64) -> f64 {
        let physics_radius = radius * self.mpp;
        4.0 / 3.0 * PI * physics_radius.powi(3) * self.density
    }

    /// Pixels -> meters
    pub fn to_physics(&self, display: f64) -> f64 {
        display * self.mpp
    }

    /// Meters -> pixels
    pub fn to_display(&self, physics: f64) -> f64 {
        physics / self.mpp
    }
}
