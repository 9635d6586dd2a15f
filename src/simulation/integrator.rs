//! Fixed-step frame integrator for the N-body system
//!
//! One frame runs four phases in a fixed order, driven by `ImpulseSet` and
//! `Parameters`:
//! 1. clear per-frame gravity vectors
//! 2. accumulate pairwise impulses into momenta
//! 3. resolve absorptions
//! 4. advance every body by its momentum over one frame

use super::collisions::{resolve_collisions, Absorption};
use super::forces::ImpulseSet;
use super::params::Parameters;
use super::states::System;

/// Advance the system by one frame
/// Updates momenta, removes absorbed bodies, moves positions, and bumps
/// `sys.frame` / `sys.t` in place. Returns the absorptions resolved this frame.
pub fn step(sys: &mut System, forces: &ImpulseSet, params: &Parameters) -> Vec<Absorption> {
    // Kick: every released pair exchanges one frame's worth of impulse.
    // Gravity lists are cleared inside, so this is also phase 1.
    forces.apply(sys, params);

    // Merge: heavier bodies swallow the lighter ones they overlap
    let absorptions = resolve_collisions(sys, params);

    // Drift: x_n+1 = x_n + p / m / mpp * spf for released, free bodies
    for b in sys.bodies_mut() {
        b.advance(params);
    }

    sys.frame += 1;
    sys.t += params.spf;

    absorptions
}

/// Advance `frames` steps, returning every absorption in order
pub fn step_n(sys: &mut System, forces: &ImpulseSet, params: &Parameters, frames: usize) -> Vec<Absorption> {
    let mut absorptions = Vec::new();
    for _ in 0..frames {
        absorptions.extend(step(sys, forces, params));
    }
    absorptions
}
