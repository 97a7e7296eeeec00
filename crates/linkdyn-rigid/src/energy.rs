//! Mechanical energy of a serial chain.

use linkdyn_math::Vec3;
use linkdyn_model::SerialChain;

use crate::{ChainState, Result};

/// Kinetic energy ½ Σ Vⱼᵀ Gⱼ Vⱼ at state (q, q̇).
pub fn kinetic_energy(chain: &SerialChain, q: &[f64], qd: &[f64]) -> Result<f64> {
    let state = ChainState::compute(chain, q, qd)?;
    Ok(chain
        .links()
        .iter()
        .zip(state.twists())
        .map(|(link, v)| 0.5 * v.dot(&link.inertia().momentum(v)))
        .sum())
}

/// Potential energy −Σ mⱼ g·p_com,j for world gravity `gravity`.
///
/// Static inverse-dynamics torques under the same gravity equal ∂PE/∂q.
pub fn potential_energy(chain: &SerialChain, q: &[f64], gravity: &Vec3) -> Result<f64> {
    Ok(-chain
        .com_frames(Some(q))?
        .iter()
        .zip(chain.links())
        .map(|(frame, link)| link.mass() * gravity.dot(&frame.pos))
        .sum::<f64>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DynamicsOptions, inverse_dynamics, test_chains};
    use approx::assert_relative_eq;

    #[test]
    fn kinetic_energy_matches_mass_matrix() {
        let chain = test_chains::rpr();
        let q = [0.4, 0.1, -0.8];
        let qd = [0.7, -0.3, 1.2];
        let options = DynamicsOptions::default();

        // Column k of M is the torque for a unit acceleration of joint k at rest.
        let mut quad = 0.0;
        for k in 0..3 {
            let mut e = [0.0; 3];
            e[k] = 1.0;
            let column = inverse_dynamics(&chain, &q, &[0.0; 3], &e, &options).unwrap();
            quad += qd[k] * column.iter().zip(&qd).map(|(m, v)| m * v).sum::<f64>();
        }
        assert_relative_eq!(
            kinetic_energy(&chain, &q, &qd).unwrap(),
            0.5 * quad,
            epsilon = 1e-10
        );
    }

    #[test]
    fn gravity_torques_are_energy_gradient() {
        let chain = test_chains::rpr();
        let g = Vec3::new(0.0, 0.0, -9.81);
        let q = [0.4, 0.1, -0.8];
        let options = DynamicsOptions::new().with_gravity(g);
        let tau = inverse_dynamics(&chain, &q, &[0.0; 3], &[0.0; 3], &options).unwrap();

        let h = 1e-6;
        for k in 0..3 {
            let (mut up, mut down) = (q, q);
            up[k] += h;
            down[k] -= h;
            let grad = (potential_energy(&chain, &up, &g).unwrap()
                - potential_energy(&chain, &down, &g).unwrap())
                / (2.0 * h);
            assert_relative_eq!(tau[k], grad, epsilon = 1e-6);
        }
    }

    #[test]
    fn resting_chain_has_no_kinetic_energy() {
        let chain = test_chains::rr();
        assert_eq!(kinetic_energy(&chain, &[0.3, 0.2], &[0.0, 0.0]).unwrap(), 0.0);
    }
}
