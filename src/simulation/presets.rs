//! Ready-made starting configurations
//!
//! - `Random`        a cloud of bodies at rest, zero total momentum
//! - `CircularOrbit` an Earth/Moon pair on a circular orbit around a fixed primary
//! - `Oscillation`   a light body falling back and forth between two fixed masses

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::PresetConfig;
use crate::simulation::error::SimError;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

pub const RANDOM_MASS_RANGE: (f64, f64) = (8.0e22, 4.0e23); // kg
pub const EARTH_MASS: f64 = 5.972e24; // kg
pub const MOON_MASS: f64 = 7.3477e22; // kg
pub const MOON_DISTANCE: f64 = 384.4; // pixels
pub const OSCILLATION_ANCHOR_MASS: f64 = 5.0e26; // kg
pub const OSCILLATION_BOB_MASS: f64 = 3.0e24; // kg

/// Where preset bodies may be placed
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub width: f64, // pixels
    pub height: f64, // pixels
}

/// Bodies for `preset`, in the order they should enter the live set
pub fn build_preset(
    preset: &PresetConfig,
    bounds: Bounds,
    seed: u64,
    params: &Parameters,
) -> Result<Vec<Body>, SimError> {
    match preset {
        PresetConfig::None => Ok(Vec::new()),
        PresetConfig::Random { count } => random_bodies(*count, bounds, seed, params),
        PresetConfig::CircularOrbit => circular_orbit(params),
        PresetConfig::Oscillation => oscillation(params),
    }
}

/// `count` released bodies at rest, spread uniformly over `bounds`
pub fn random_bodies(count: usize, bounds: Bounds, seed: u64, params: &Parameters) -> Result<Vec<Body>, SimError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (m_lo, m_hi) = RANDOM_MASS_RANGE;

    (0..count)
        .map(|_| {
            let x = rng.random_range(0.0..=bounds.width);
            let y = rng.random_range(0.0..=bounds.height);
            let m = rng.random_range(m_lo..=m_hi);
            Body::new(NVec2::new(x, y), NVec2::zeros(), m, params)
        })
        .collect()
}

/// Momentum that keeps `orbiter` on a circular orbit of `distance` pixels around `primary_mass`
pub fn circular_orbit_momentum(primary_mass: f64, orbiter_mass: f64, distance: f64, params: &Parameters) -> f64 {
    let r = params.to_physics(distance);
    (params.G * (primary_mass + orbiter_mass) / r).sqrt() * orbiter_mass
}

/// Fixed Earth at (400, 400), Moon to its right moving perpendicular to the radius
pub fn circular_orbit(params: &Parameters) -> Result<Vec<Body>, SimError> {
    let p1 = NVec2::new(400.0, 400.0);
    let p2 = NVec2::new(p1.x + MOON_DISTANCE, p1.y);

    let magnitude = circular_orbit_momentum(EARTH_MASS, MOON_MASS, MOON_DISTANCE, params);
    let d = p2 - p1;
    let angle = d.y.atan2(d.x) + std::f64::consts::FRAC_PI_2;
    let momentum = NVec2::new(magnitude * angle.cos(), magnitude * angle.sin());

    Ok(vec![
        Body::new(p1, NVec2::zeros(), EARTH_MASS, params)?.fixed(true),
        Body::new(p2, momentum, MOON_MASS, params)?,
    ])
}

/// Two fixed anchors and a free bob released above their midpoint
pub fn oscillation(params: &Parameters) -> Result<Vec<Body>, SimError> {
    Ok(vec![
        Body::new(NVec2::new(200.0, 400.0), NVec2::zeros(), OSCILLATION_ANCHOR_MASS, params)?.fixed(true),
        Body::new(NVec2::new(600.0, 400.0), NVec2::zeros(), OSCILLATION_ANCHOR_MASS, params)?.fixed(true),
        Body::new(NVec2::new(400.0, 100.0), NVec2::zeros(), OSCILLATION_BOB_MASS, params)?,
    ])
}
