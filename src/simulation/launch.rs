//! Aiming and launching a held body
//!
//! A new body sits unreleased at the pointer while the user drags away from it.
//! The drag line is clamped to `launch_line_length` pixels; its length sets the
//! launch speed (up to `max_launch_speed`) and the body flies the opposite way,
//! like a slingshot.

use std::f64::consts::PI;

use crate::simulation::params::Parameters;
use crate::simulation::states::NVec2;

/// What the renderer draws while aiming
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchLine {
    pub start: NVec2, // held body center
    pub end: NVec2, // pointer, clamped to the max line length
    pub strength: f64, // 0..=1, share of the max launch speed
}

/// Clamp the drag line from `anchor` toward `pointer`
pub fn aim(anchor: NVec2, pointer: NVec2, params: &Parameters) -> LaunchLine {
    let drag = pointer - anchor;
    let length = drag.norm();
    let max_length = params.launch_line_length;

    if length > max_length {
        let angle = drag.y.atan2(drag.x);
        LaunchLine {
            start: anchor,
            end: anchor + NVec2::new(angle.cos(), angle.sin()) * max_length,
            strength: 1.0,
        }
    } else {
        LaunchLine {
            start: anchor,
            end: pointer,
            strength: length / max_length,
        }
    }
}

/// Velocity (m/s) given to a body released with the pointer at `pointer`
pub fn launch_velocity(anchor: NVec2, pointer: NVec2, params: &Parameters) -> NVec2 {
    let line = aim(anchor, pointer, params);
    if line.strength == 0.0 {
        return NVec2::zeros();
    }
    let drag = line.end - line.start;
    let angle = drag.y.atan2(drag.x) + PI;
    let speed = line.strength * params.max_launch_speed;
    NVec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Digits typed while a body is held, read as `digits * 10^exponent` kg
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MassEntry {
    digits: String,
}

impl MassEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one decimal digit; anything above 9 is ignored
    pub fn push_digit(&mut self, digit: u8) {
        if digit <= 9 {
            self.digits.push(char::from(b'0' + digit));
        }
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Consume the typed digits. Empty or all-zero input yields no mass.
    pub fn commit(&mut self, exponent: i32) -> Option<f64> {
        let digits = std::mem::take(&mut self.digits);
        let value: f64 = digits.parse().ok()?;
        if value > 0.0 {
            Some(value * 10f64.powi(exponent))
        } else {
            None
        }
    }
}
