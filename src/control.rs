//! The hook through which user code steers the triangle.
//!
//! A [`ControlLogic`] is handed the live [`Triangle`] once per armed frame. It
//! can read each corner's `sensor_reading()` and `has_changed()` flag, look at
//! `control_corner()`, and move the robot with `move_by` or
//! `move_in_normal_direction`. Sensor values are the exact colors of the ring
//! pattern under each corner; there is no simulated noise.

use crate::geometry::Triangle;
use tracing::debug;

/// User-supplied decision routine, run once per armed frame
pub trait ControlLogic {
    /// Performs one decision step on the triangle
    fn step(&mut self, triangle: &mut Triangle);
}

impl<F> ControlLogic for F
where
    F: FnMut(&mut Triangle),
{
    fn step(&mut self, triangle: &mut Triangle) {
        self(triangle)
    }
}

/// Default step length of [`NormalStep`], in pixels
pub const DEFAULT_NORMAL_STEP: f64 = 5.0;

/// Drives straight along the normal of the edge opposite the control corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalStep {
    step: f64,
}

impl NormalStep {
    pub fn new(step: f64) -> Self {
        NormalStep { step }
    }
}

impl Default for NormalStep {
    fn default() -> Self {
        Self::new(DEFAULT_NORMAL_STEP)
    }
}

impl ControlLogic for NormalStep {
    fn step(&mut self, triangle: &mut Triangle) {
        debug!(control_corner = %triangle.control_corner().label(), "controller step");
        triangle.move_in_normal_direction(self.step);
    }
}

/// Leaves the triangle alone
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Idle;

impl ControlLogic for Idle {
    fn step(&mut self, _triangle: &mut Triangle) {}
}
