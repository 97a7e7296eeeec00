//! Inverse dynamics: joint torques from joint accelerations.
//!
//! Solved in two passes. The first determines every twist acceleration from
//! the known q̈; the second balances wrenches from the tool back to the base
//! and projects them onto the joint axes.

use linkdyn_linear::{LinearSystem, Unknown};
use linkdyn_math::{DVec, SpatialVec};
use linkdyn_model::{LinkModel, SerialChain};
use tracing::debug;

use crate::forward::check_links;
use crate::{ChainState, DynamicsError, DynamicsOptions, LinkEquations, Result};

/// Assemble the acceleration pass: base equation plus one block per link.
pub fn inverse_system(
    chain: &SerialChain,
    q: &[f64],
    qd: &[f64],
    qdd: &[f64],
    options: &DynamicsOptions,
) -> Result<LinearSystem> {
    let state = ChainState::compute(chain, q, qd)?;
    build_accel_pass(chain, &state, qdd, options)
}

fn build_accel_pass(
    chain: &SerialChain,
    state: &ChainState,
    qdd: &[f64],
    options: &DynamicsOptions,
) -> Result<LinearSystem> {
    check_links(chain)?;
    state.check_chain(chain)?;
    chain.check_len("joint accelerations", qdd)?;

    let mut system = LinearSystem::new();
    system.push(LinkModel::base_equation(&SpatialVec::from_vec6(
        options.base_twist_accel,
    )));
    for (link, link_state) in state.links(chain, None) {
        system.push(link.inverse_equations(&link_state, qdd[link_state.index - 1]));
    }
    debug!(
        links = chain.num_links(),
        rows = system.num_rows(),
        "assembled acceleration pass"
    );
    Ok(system)
}

fn build_wrench_pass(
    chain: &SerialChain,
    state: &ChainState,
    twist_accels: &[SpatialVec],
    options: &DynamicsOptions,
) -> LinearSystem {
    let mut system = LinearSystem::new();
    system.push(LinkModel::tool_equation(
        chain.num_links(),
        &SpatialVec::from_vec6(options.external_wrench),
    ));
    for ((link, link_state), accel) in state
        .links(chain, options.gravity.as_ref())
        .zip(twist_accels)
    {
        system.extend(link.wrench_equations(&link_state, accel));
    }
    debug!(
        links = chain.num_links(),
        rows = system.num_rows(),
        "assembled wrench pass"
    );
    system
}

/// Joint torques τ needed for accelerations `qdd` at state (q, q̇).
pub fn inverse_dynamics(
    chain: &SerialChain,
    q: &[f64],
    qd: &[f64],
    qdd: &[f64],
    options: &DynamicsOptions,
) -> Result<DVec> {
    check_links(chain)?;
    let state = ChainState::compute(chain, q, qd)?;
    inverse_dynamics_with_state(chain, &state, qdd, options)
}

/// [`inverse_dynamics`] with precomputed kinematics.
pub fn inverse_dynamics_with_state(
    chain: &SerialChain,
    state: &ChainState,
    qdd: &[f64],
    options: &DynamicsOptions,
) -> Result<DVec> {
    let accels = build_accel_pass(chain, state, qdd, options)?.solve()?;
    let twist_accels = (1..=chain.num_links())
        .map(|j| {
            accels
                .spatial(Unknown::TwistAccel(j))
                .ok_or_else(|| DynamicsError::IllPosedSystem(format!("no value for T{j}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let wrenches = build_wrench_pass(chain, state, &twist_accels, options).solve()?;
    let tau = (1..=chain.num_links())
        .map(|j| {
            wrenches
                .scalar(Unknown::JointTorque(j))
                .ok_or_else(|| DynamicsError::IllPosedSystem(format!("no value for t{j}")))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(links = chain.num_links(), "inverse dynamics solved");
    Ok(DVec::from_vec(tau))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{forward_dynamics, test_chains};
    use approx::assert_relative_eq;
    use linkdyn_math::{Vec3, Vec6};
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    /// Planar 2R dynamics in closed form: COM distance 3 from its joint,
    /// link length 2, unit mass, inertia 1/6 about z.
    fn planar_torques(q: [f64; 2], qd: [f64; 2], qdd: [f64; 2]) -> [f64; 2] {
        let (l1, lc, inertia) = (2.0, 3.0, 1.0 / 6.0);
        let c2 = q[1].cos();
        let h = -l1 * lc * q[1].sin();
        let m11 = 2.0 * inertia + lc * lc + l1 * l1 + lc * lc + 2.0 * l1 * lc * c2;
        let m12 = inertia + lc * lc + l1 * lc * c2;
        let m22 = inertia + lc * lc;
        [
            m11 * qdd[0] + m12 * qdd[1] + h * (2.0 * qd[0] * qd[1] + qd[1] * qd[1]),
            m12 * qdd[0] + m22 * qdd[1] - h * qd[0] * qd[0],
        ]
    }

    #[test]
    fn matches_closed_form_planar_arm() {
        let chain = test_chains::rr();
        let (q, qd, qdd) = ([0.3, -0.7], [1.0, 2.0], [0.5, -1.5]);
        let tau = inverse_dynamics(&chain, &q, &qd, &qdd, &DynamicsOptions::default()).unwrap();
        let expected = planar_torques(q, qd, qdd);
        assert_relative_eq!(tau[0], expected[0], epsilon = 1e-9);
        assert_relative_eq!(tau[1], expected[1], epsilon = 1e-9);
        assert_relative_eq!(tau[0], 26.044589092222356, epsilon = 1e-9);
        assert_relative_eq!(tau[1], -10.737446228239344, epsilon = 1e-9);
    }

    #[test]
    fn centripetal_torques_at_bent_elbow() {
        let chain = test_chains::rr();
        let tau = inverse_dynamics(
            &chain,
            &[0.0, FRAC_PI_2],
            &[1.0, 1.0],
            &[0.0, 0.0],
            &DynamicsOptions::default(),
        )
        .unwrap();
        assert_relative_eq!(tau[0], -18.0, epsilon = 1e-9);
        assert_relative_eq!(tau[1], 6.0, epsilon = 1e-9);
    }

    #[test]
    fn static_gravity_torques() {
        let chain = test_chains::rr();
        let options = DynamicsOptions::new().with_gravity(Vec3::new(0.0, -9.8, 0.0));
        let tau = inverse_dynamics(&chain, &[0.0, 0.0], &[0.0, 0.0], &[0.0, 0.0], &options)
            .unwrap();
        assert_relative_eq!(tau[0], 78.4, epsilon = 1e-9);
        assert_relative_eq!(tau[1], 29.4, epsilon = 1e-9);
    }

    #[test]
    fn acceleration_pass_is_square() {
        let chain = test_chains::rpr();
        let system = inverse_system(
            &chain,
            &[0.0; 3],
            &[0.0; 3],
            &[0.0; 3],
            &DynamicsOptions::default(),
        )
        .unwrap();
        assert_eq!(system.num_rows(), 6 * 4);
        assert!(system.solve().is_ok());
    }

    proptest! {
        #[test]
        fn forward_inverts_inverse(
            q in prop::collection::vec(-3.0f64..3.0, 3),
            qd in prop::collection::vec(-2.0f64..2.0, 3),
            qdd in prop::collection::vec(-5.0f64..5.0, 3),
            g in prop::collection::vec(-10.0f64..10.0, 3),
            load in prop::collection::vec(-1.0f64..1.0, 6),
        ) {
            let chain = test_chains::rpr();
            let options = DynamicsOptions::new()
                .with_gravity(Vec3::from_column_slice(&g))
                .with_base_twist_accel(Vec6::new(0.1, 0.0, -0.2, 0.3, 0.0, 1.0))
                .with_external_wrench(Vec6::from_column_slice(&load));
            let tau = inverse_dynamics(&chain, &q, &qd, &qdd, &options).unwrap();
            let back = forward_dynamics(&chain, &q, &qd, tau.as_slice(), &options).unwrap();
            for (a, b) in back.iter().zip(&qdd) {
                prop_assert!((a - b).abs() < 1e-7, "{a} vs {b}");
            }
        }

        #[test]
        fn torque_is_affine_in_acceleration(
            q in prop::collection::vec(-3.0f64..3.0, 3),
            qd in prop::collection::vec(-2.0f64..2.0, 3),
            x in prop::collection::vec(-5.0f64..5.0, 3),
            y in prop::collection::vec(-5.0f64..5.0, 3),
            a in -2.0f64..2.0,
            b in -2.0f64..2.0,
        ) {
            let chain = test_chains::rpr();
            let options = DynamicsOptions::new().with_gravity(Vec3::new(0.0, 0.0, -9.81));
            let tau = |qdd: &[f64]| inverse_dynamics(&chain, &q, &qd, qdd, &options).unwrap();
            let offset = tau(&[0.0; 3][..]);
            let mixed: Vec<f64> = x.iter().zip(&y).map(|(x, y)| a * x + b * y).collect();
            let lhs = tau(mixed.as_slice()) - &offset;
            let rhs = (tau(x.as_slice()) - &offset) * a + (tau(y.as_slice()) - &offset) * b;
            prop_assert!((lhs - rhs).norm() < 1e-8);
        }
    }
}
