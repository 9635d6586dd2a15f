//! Pairwise impulse contributors for the n-body engine
//!
//! Each term hands back the momentum change one body of a pair receives during a
//! single frame; its partner receives the exact negation. Newtonian gravity is the
//! only term registered by default.

use log::debug;

use crate::simulation::pairs::{pair_mut, unordered_pairs};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, System};

/// Trait for pairwise momentum sources operating on two released bodies
///
/// Return the impulse applied to `a` by `b` over one frame, or `None` to skip the
/// pair entirely (no momentum change, no gravity vector recorded).
pub trait PairImpulse {
    fn impulse(&self, a: &Body, b: &Body, params: &Parameters) -> Option<NVec2>;
}

/// Collection of pairwise impulse terms
/// Each term implements [`PairImpulse`] and every non-skipped contribution is
/// added to both bodies of the pair
pub struct ImpulseSet {
    terms: Vec<Box<dyn PairImpulse + Send + Sync>>,
}

impl Default for ImpulseSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ImpulseSet {
    /// Create an empty impulse set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Impulse set with Newtonian gravity registered
    pub fn gravity() -> Self {
        Self::new().with(NewtonianGravity)
    }

    /// Add an impulse term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: PairImpulse + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Apply every term to every unordered pair of released bodies in `sys`
    /// - all gravity-vector lists are cleared first, unreleased bodies included
    /// - each applied impulse is added to momentum and recorded on both bodies
    pub fn apply(&self, sys: &mut System, params: &Parameters) {
        let bodies = sys.bodies_mut();
        for b in bodies.iter_mut() {
            b.clear_gravity_vectors();
        }

        for (i, j) in unordered_pairs(bodies.len()) {
            let (bi, bj) = pair_mut(bodies, i, j);
            if !(bi.released && bj.released) { // unreleased bodies are inert
                continue;
            }
            for term in &self.terms {
                if let Some(impulse) = term.impulse(bi, bj, params) {
                    bi.receive_impulse(impulse);
                    bj.receive_impulse(-impulse);
                }
            }
        }
    }
}

/// Newtonian gravity folded into a per-frame momentum change
///
/// F = G * m1 * m2 / d^2, with d in meters, multiplied by the frame duration so
/// the result is a momentum delta rather than a force.
pub struct NewtonianGravity;

impl PairImpulse for NewtonianGravity {
    fn impulse(&self, a: &Body, b: &Body, params: &Parameters) -> Option<NVec2> {
        // Distance between centers, converted from pixels to meters
        let d = params.to_physics(a.distance_to(b));

        // Coincident centers have no direction and an infinite magnitude
        if d == 0.0 {
            debug!("skipping gravity between {:?} and {:?}: zero distance", a.id(), b.id());
            return None;
        }

        let f = params.G * a.mass() * b.mass() / (d * d) * params.spf;

        // Direction from a's center to b's center, measured in display space
        let theta = a.angle_to(b);

        Some(NVec2::new(f * theta.cos(), f * theta.sin()))
    }
}
