//! Collision detection and absorption
//!
//! Two released bodies collide when their display-space circles overlap enough;
//! the heavier one absorbs the lighter, taking over its momentum and mass.
//!
//! The overlap tolerance is asymmetric. For a pair `(a, b)` in enumeration order:
//! - `a` absorbs `b` when `d <= a.r + b.r * collision_factor` and `a.m >= b.m`
//! - `b` absorbs `a` when `d <= b.r + a.r * REVERSE_COLLISION_FACTOR` and `b.m >= a.m`
//!
//! The second check runs last and wins, so equal masses passing both end with `b`
//! as the survivor.
//!
//! Absorbed bodies are only marked dead during the scan; the live set is compacted
//! once the scan is over, so every pair index stays valid throughout.

use log::debug;

use crate::simulation::pairs::{pair_mut, unordered_pairs};
use crate::simulation::params::{Parameters, REVERSE_COLLISION_FACTOR};
use crate::simulation::states::{Body, BodyId, System};

/// Which side of a pair survives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absorber {
    First,
    Second,
}

/// One resolved absorption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Absorption {
    pub survivor: BodyId,
    pub absorbed: BodyId,
}

/// Decide whether `a` and `b` (in that enumeration order) merge, and who survives
pub fn absorber(a: &Body, b: &Body, params: &Parameters) -> Option<Absorber> {
    let d = a.distance_to(b);

    let mut outcome = None;
    if d <= a.radius() + b.radius() * params.collision_factor && a.mass() >= b.mass() {
        outcome = Some(Absorber::First);
    }
    if d <= b.radius() + a.radius() * REVERSE_COLLISION_FACTOR && b.mass() >= a.mass() {
        outcome = Some(Absorber::Second);
    }
    outcome
}

/// Resolve every absorption among released bodies in one pass
///
/// Pairs are visited in enumeration order. A pair touching a body already absorbed
/// during this pass is skipped. Survivors keep their position; the returned events
/// are in resolution order.
pub fn resolve_collisions(sys: &mut System, params: &Parameters) -> Vec<Absorption> {
    let n = sys.len();
    let mut dead = vec![false; n];
    let mut events = Vec::new();

    {
        let bodies = sys.bodies_mut();
        for (i, j) in unordered_pairs(n) {
            if dead[i] || dead[j] {
                continue;
            }
            let (bi, bj) = pair_mut(bodies, i, j);
            if !(bi.released && bj.released) {
                continue;
            }

            let (survivor, absorbed, absorbed_idx) = match absorber(bi, bj, params) {
                Some(Absorber::First) => (bi, bj, j),
                Some(Absorber::Second) => (bj, bi, i),
                None => continue,
            };

            survivor.absorb(absorbed, params);
            dead[absorbed_idx] = true;

            debug!(
                "{:?} absorbed {:?}, mass now {:.4e} kg",
                survivor.id(),
                absorbed.id(),
                survivor.mass()
            );
            events.push(Absorption {
                survivor: survivor.id(),
                absorbed: absorbed.id(),
            });
        }
    }

    if !events.is_empty() {
        sys.retain_live(&dead);
    }
    events
}
