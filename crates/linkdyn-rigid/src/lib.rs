//! Rigid-body dynamics of serial chains for linkdyn.
//!
//! Per link, the recursive Newton-Euler relations (acceleration propagation,
//! wrench balance, torque projection) are emitted as exact linear equations
//! and solved as one system:
//! - `forward_dynamics`: (q, q̇, τ) → q̈
//! - `inverse_dynamics`: (q, q̇, q̈) → τ

pub mod energy;
pub mod equations;
pub mod error;
pub mod forward;
pub mod inverse;
pub mod kinematics;
pub mod options;

pub use energy::{kinetic_energy, potential_energy};
pub use equations::{LinkEquations, LinkState};
pub use error::{DynamicsError, Result};
pub use forward::{forward_dynamics, forward_dynamics_with_state, forward_system};
pub use inverse::{inverse_dynamics, inverse_dynamics_with_state, inverse_system};
pub use kinematics::{ChainState, propagate_twists, solve_twists};
pub use options::DynamicsOptions;

#[cfg(test)]
pub(crate) mod test_chains {
    use linkdyn_math::{Pose, Vec3};
    use linkdyn_model::{ChainBuilder, DhParameters, JointType, SerialChain};

    fn planar_link() -> DhParameters {
        DhParameters::new(
            0.0,
            0.0,
            2.0,
            0.0,
            JointType::Revolute,
            1.0,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0 / 6.0, 1.0 / 6.0),
        )
    }

    /// Two-link planar arm, tool rotated 90° about y.
    pub fn rr() -> SerialChain {
        ChainBuilder::new()
            .link(planar_link())
            .link(planar_link())
            .tool(Pose::rot_y(std::f64::consts::FRAC_PI_2))
            .build()
    }

    /// Revolute-prismatic-revolute chain with twisted axes.
    pub fn rpr() -> SerialChain {
        ChainBuilder::new()
            .link(DhParameters::new(
                0.0,
                0.3,
                0.5,
                0.4,
                JointType::Revolute,
                2.0,
                Vec3::new(0.2, 0.05, -0.1),
                Vec3::new(0.05, 0.08, 0.1),
            ))
            .link(DhParameters::new(
                0.2,
                0.0,
                0.1,
                -1.1,
                JointType::Prismatic,
                1.5,
                Vec3::new(0.0, 0.1, 0.3),
                Vec3::new(0.03, 0.04, 0.02),
            ))
            .link(DhParameters::new(
                0.0,
                0.2,
                0.4,
                0.7,
                JointType::Revolute,
                0.8,
                Vec3::new(0.1, 0.0, 0.05),
                Vec3::new(0.01, 0.02, 0.015),
            ))
            .base(Pose::new(Pose::rot_x(0.3).rot, Vec3::new(0.1, -0.2, 0.5)))
            .tool(Pose::translation(Vec3::new(0.0, 0.0, 0.1)))
            .build()
    }
}
