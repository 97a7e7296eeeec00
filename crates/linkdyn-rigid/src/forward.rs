//! Forward dynamics: joint accelerations from joint torques.

use linkdyn_linear::{LinearSystem, Unknown};
use linkdyn_math::{DVec, SpatialVec};
use linkdyn_model::{LinkModel, SerialChain};
use tracing::debug;

use crate::{ChainState, DynamicsError, DynamicsOptions, LinkEquations, Result};

/// Reject chains for which no dynamics system exists.
pub(crate) fn check_links(chain: &SerialChain) -> Result<()> {
    if chain.num_links() == 0 {
        Err(DynamicsError::IllPosedSystem("chain has no links".to_string()))
    } else {
        Ok(())
    }
}

/// Assemble the forward system: base, three blocks per link, tool.
pub fn forward_system(
    chain: &SerialChain,
    q: &[f64],
    qd: &[f64],
    tau: &[f64],
    options: &DynamicsOptions,
) -> Result<LinearSystem> {
    let state = ChainState::compute(chain, q, qd)?;
    build_forward(chain, &state, tau, options)
}

fn build_forward(
    chain: &SerialChain,
    state: &ChainState,
    tau: &[f64],
    options: &DynamicsOptions,
) -> Result<LinearSystem> {
    check_links(chain)?;
    state.check_chain(chain)?;
    chain.check_len("joint torques", tau)?;

    let mut system = LinearSystem::new();
    system.push(LinkModel::base_equation(&SpatialVec::from_vec6(
        options.base_twist_accel,
    )));
    for (link, link_state) in state.links(chain, options.gravity.as_ref()) {
        system.extend(link.forward_equations(&link_state, tau[link_state.index - 1]));
    }
    system.push(LinkModel::tool_equation(
        chain.num_links(),
        &SpatialVec::from_vec6(options.external_wrench),
    ));

    debug!(
        links = chain.num_links(),
        rows = system.num_rows(),
        "assembled forward system"
    );
    Ok(system)
}

/// Joint accelerations q̈ produced by torques `tau` at state (q, q̇).
pub fn forward_dynamics(
    chain: &SerialChain,
    q: &[f64],
    qd: &[f64],
    tau: &[f64],
    options: &DynamicsOptions,
) -> Result<DVec> {
    check_links(chain)?;
    let state = ChainState::compute(chain, q, qd)?;
    forward_dynamics_with_state(chain, &state, tau, options)
}

/// [`forward_dynamics`] with precomputed kinematics.
pub fn forward_dynamics_with_state(
    chain: &SerialChain,
    state: &ChainState,
    tau: &[f64],
    options: &DynamicsOptions,
) -> Result<DVec> {
    let solution = build_forward(chain, state, tau, options)?.solve()?;
    let qdd = (1..=chain.num_links())
        .map(|j| {
            solution
                .scalar(Unknown::JointAccel(j))
                .ok_or_else(|| DynamicsError::IllPosedSystem(format!("no value for a{j}")))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(links = chain.num_links(), "forward dynamics solved");
    Ok(DVec::from_vec(qdd))
}
