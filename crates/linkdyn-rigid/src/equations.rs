//! Per-link Newton-Euler equations.
//!
//! Link j (1-based) couples its own unknowns to those of link i = j-1 and
//! k = j+1. Index 0 is the base and index N+1 the tool. Every quantity of link
//! j is expressed in its center-of-mass frame.
//!
//! Forward mode, unknowns T (twist acceleration), F (wrench), a (joint accel):
//!
//! ```text
//! Tj - Aj·aj - Ad(jTi)·Ti        = ad(Vj)·Aj·q̇j
//! Gj·Tj - Fj + Ad(kTj)ᵀ·Fk        = ad(Vj)ᵀ·Gj·Vj
//! Ajᵀ·Fj                          = τj
//! ```
//!
//! With gravity, the force rows of the wrench balance are replaced by m·g.

use linkdyn_linear::{LinearEquation, Unknown, column, mat6, row, vec6};
use linkdyn_math::{DMat, DVec, Pose, SpatialVec, Vec3, ad};
use linkdyn_model::LinkModel;
use tracing::trace;

/// Kinematic context of one link for a single query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkState {
    /// 1-based link index.
    pub index: usize,
    /// Previous COM frame (or the base) seen from this link's COM frame: jTi.
    pub from_previous: Pose,
    /// This COM frame seen from the next COM frame (or the tool): kTj.
    pub to_next: Pose,
    pub joint_velocity: f64,
    /// Velocity twist of this link.
    pub twist: SpatialVec,
    /// Gravity expressed in this link's COM frame.
    pub gravity: Option<Vec3>,
}

fn eye(n: usize) -> DMat {
    DMat::identity(n, n)
}

fn scalar(v: f64) -> DVec {
    DVec::from_element(1, v)
}

/// Equation emission for one link of a serial chain.
pub trait LinkEquations {
    /// Fix the base twist acceleration `T0`.
    fn base_equation(base_twist_accel: &SpatialVec) -> LinearEquation
    where
        Self: Sized,
    {
        LinearEquation::unary(Unknown::BASE_ACCEL, eye(6), vec6(base_twist_accel))
    }

    /// Fix the tool wrench `F(N+1)` to the negated external wrench.
    fn tool_equation(num_links: usize, external_wrench: &SpatialVec) -> LinearEquation
    where
        Self: Sized,
    {
        LinearEquation::unary(
            Unknown::Wrench(num_links + 1),
            eye(6),
            vec6(&-*external_wrench),
        )
    }

    /// `Vj - Ad(jTi)·Vi = Aj·q̇j`, or `V1 = A1·q̇1` for the first link.
    fn twist_equation(&self, index: usize, from_previous: &Pose, joint_velocity: f64)
    -> LinearEquation;

    /// Acceleration propagation, wrench balance and torque projection with the
    /// joint torque known.
    fn forward_equations(&self, state: &LinkState, torque: f64) -> [LinearEquation; 3];

    /// Acceleration propagation with the joint acceleration known.
    fn inverse_equations(&self, state: &LinkState, joint_accel: f64) -> LinearEquation;

    /// Wrench balance with `Tj` known, and torque projection with `τj` unknown.
    fn wrench_equations(&self, state: &LinkState, twist_accel: &SpatialVec)
    -> [LinearEquation; 2];
}

impl LinkEquations for LinkModel {
    fn twist_equation(
        &self,
        index: usize,
        from_previous: &Pose,
        joint_velocity: f64,
    ) -> LinearEquation {
        let rhs = vec6(&(self.screw_axis() * joint_velocity));
        if index == 1 {
            LinearEquation::unary(Unknown::Twist(1), eye(6), rhs)
        } else {
            LinearEquation::binary(
                Unknown::Twist(index),
                eye(6),
                Unknown::Twist(index - 1),
                -mat6(&from_previous.adjoint_matrix()),
                rhs,
            )
        }
    }

    fn forward_equations(&self, state: &LinkState, torque: f64) -> [LinearEquation; 3] {
        let j = state.index;
        let axis = self.screw_axis();
        trace!(link = j, torque, "forward equations");

        let accel = LinearEquation::ternary(
            Unknown::TwistAccel(j),
            eye(6),
            Unknown::JointAccel(j),
            -column(&axis),
            Unknown::TwistAccel(j - 1),
            -mat6(&state.from_previous.adjoint_matrix()),
            vec6(&velocity_product(self, state)),
        );
        let balance = LinearEquation::ternary(
            Unknown::TwistAccel(j),
            mat6(&self.spatial_inertia()),
            Unknown::Wrench(j),
            -eye(6),
            Unknown::Wrench(j + 1),
            mat6(&state.to_next.adjoint_matrix().transpose()),
            vec6(&bias_wrench(self, state)),
        );
        let projection = LinearEquation::unary(Unknown::Wrench(j), row(&axis), scalar(torque));
        [accel, balance, projection]
    }

    fn inverse_equations(&self, state: &LinkState, joint_accel: f64) -> LinearEquation {
        let j = state.index;
        trace!(link = j, joint_accel, "acceleration equation");
        let rhs = velocity_product(self, state) + self.screw_axis() * joint_accel;
        LinearEquation::binary(
            Unknown::TwistAccel(j),
            eye(6),
            Unknown::TwistAccel(j - 1),
            -mat6(&state.from_previous.adjoint_matrix()),
            vec6(&rhs),
        )
    }

    fn wrench_equations(
        &self,
        state: &LinkState,
        twist_accel: &SpatialVec,
    ) -> [LinearEquation; 2] {
        let j = state.index;
        trace!(link = j, "wrench equations");
        let inertial = SpatialVec::from_vec6(self.spatial_inertia() * twist_accel.data);
        let balance = LinearEquation::binary(
            Unknown::Wrench(j),
            -eye(6),
            Unknown::Wrench(j + 1),
            mat6(&state.to_next.adjoint_matrix().transpose()),
            vec6(&(bias_wrench(self, state) - inertial)),
        );
        let projection = LinearEquation::binary(
            Unknown::JointTorque(j),
            eye(1),
            Unknown::Wrench(j),
            -row(&self.screw_axis()),
            scalar(0.0),
        );
        [balance, projection]
    }
}

/// ad(Vj)·Aj·q̇j
fn velocity_product(link: &LinkModel, state: &LinkState) -> SpatialVec {
    state
        .twist
        .cross_motion(&(link.screw_axis() * state.joint_velocity))
}

/// ad(Vj)ᵀ·Gj·Vj, with the force rows replaced by m·g under gravity.
fn bias_wrench(link: &LinkModel, state: &LinkState) -> SpatialVec {
    let v = &state.twist;
    let coriolis = SpatialVec::from_vec6(ad(v).transpose() * link.inertia().momentum(v).data);
    match state.gravity {
        Some(g) => SpatialVec::new(coriolis.angular(), g * link.mass()),
        None => coriolis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_chains;
    use approx::assert_relative_eq;

    fn state(index: usize) -> LinkState {
        LinkState {
            index,
            from_previous: Pose::rot_z(0.4),
            to_next: Pose::translation(Vec3::new(1.0, 0.0, 0.0)),
            joint_velocity: 1.5,
            twist: SpatialVec::new(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 1.0, 0.0)),
            gravity: None,
        }
    }

    #[test]
    fn forward_block_is_thirteen_rows() {
        let chain = test_chains::rr();
        let eqs = chain.links()[1].forward_equations(&state(2), 0.7);
        let rows: usize = eqs.iter().map(LinearEquation::rows).sum();
        assert_eq!(rows, 13);
        assert!(eqs[0].coefficient(Unknown::TwistAccel(1)).is_some());
        assert!(eqs[1].coefficient(Unknown::Wrench(3)).is_some());
        assert_eq!(eqs[2].rhs()[0], 0.7);
    }

    #[test]
    fn first_twist_equation_fixes_value() {
        let chain = test_chains::rr();
        let eq = chain.links()[0].twist_equation(1, &Pose::identity(), 2.0);
        assert_eq!(eq.terms().len(), 1);
        assert_relative_eq!(eq.rhs()[2], 2.0, epsilon = 1e-12);
        assert_relative_eq!(eq.rhs()[4], 6.0, epsilon = 1e-12);
    }

    #[test]
    fn boundary_equations() {
        let wrench = SpatialVec::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -3.0));
        let tool = LinkModel::tool_equation(4, &wrench);
        assert!(tool.coefficient(Unknown::Wrench(5)).is_some());
        assert_eq!(tool.rhs()[0], -1.0);
        assert_eq!(tool.rhs()[5], 3.0);

        let base = LinkModel::base_equation(&SpatialVec::zero());
        assert!(base.coefficient(Unknown::BASE_ACCEL).is_some());
    }

    #[test]
    fn gravity_replaces_force_rows() {
        let chain = test_chains::rr();
        let link = &chain.links()[0];
        let mut s = state(1);
        let free = bias_wrench(link, &s);
        s.gravity = Some(Vec3::new(0.0, -9.8, 0.0));
        let loaded = bias_wrench(link, &s);
        assert_relative_eq!(loaded.angular(), free.angular(), epsilon = 1e-12);
        assert_relative_eq!(loaded.linear(), Vec3::new(0.0, -9.8, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn coriolis_matches_cross_force() {
        let chain = test_chains::rr();
        let link = &chain.links()[1];
        let s = state(2);
        let expected = -s.twist.cross_force(&link.inertia().momentum(&s.twist));
        assert_relative_eq!(bias_wrench(link, &s).data, expected.data, epsilon = 1e-12);
    }
}
