//! Per-call dynamics inputs beyond the joint state.

use linkdyn_math::{Vec3, Vec6};

/// Gravity, base motion and tool load for one dynamics query.
///
/// Defaults to no gravity, a non-accelerating base and no external load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicsOptions {
    /// Gravitational acceleration in the world frame.
    pub gravity: Option<Vec3>,
    /// Twist acceleration of the base, expressed in the base frame.
    pub base_twist_accel: Vec6,
    /// Wrench applied by the environment at the tool frame.
    pub external_wrench: Vec6,
}

impl Default for DynamicsOptions {
    fn default() -> Self {
        Self {
            gravity: None,
            base_twist_accel: Vec6::zeros(),
            external_wrench: Vec6::zeros(),
        }
    }
}

impl DynamicsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn with_base_twist_accel(mut self, accel: Vec6) -> Self {
        self.base_twist_accel = accel;
        self
    }

    pub fn with_external_wrench(mut self, wrench: Vec6) -> Self {
        self.external_wrench = wrench;
        self
    }
}
