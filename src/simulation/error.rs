//! Recoverable errors raised by the engine
//!
//! None of these escape a simulation step: they are only returned from
//! setters and constructors, before any state is touched.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Mass must be finite and strictly positive
    InvalidMass(f64),
    /// Radius must be finite and strictly positive
    InvalidRadius(f64),
    /// A simulation constant is outside its valid range
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidMass(m) => write!(f, "invalid mass {m}: must be finite and > 0"),
            SimError::InvalidRadius(r) => write!(f, "invalid radius {r}: must be finite and > 0"),
            SimError::InvalidParameter { name, value } => {
                write!(f, "invalid parameter `{name}` = {value}")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Shared guard for mass inputs
pub(crate) fn check_mass(mass: f64) -> Result<f64, SimError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(SimError::InvalidMass(mass))
    }
}
