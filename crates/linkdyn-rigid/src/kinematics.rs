//! Velocity kinematics: COM frames, relative transforms and link twists.

use linkdyn_linear::{LinearSystem, Unknown};
use linkdyn_math::{Pose, SpatialVec, Vec3};
use linkdyn_model::{LinkModel, SerialChain};
use tracing::debug;

use crate::{DynamicsError, LinkEquations, LinkState, Result};

/// Twists of every link by the closed-form recursion.
///
/// `relative` is the output of [`SerialChain::relative_transforms`]:
/// V1 = A1·q̇1, Vj = Ad(jTi)·V(j-1) + Aj·q̇j.
pub fn propagate_twists(
    chain: &SerialChain,
    relative: &[Pose],
    qd: &[f64],
) -> Result<Vec<SpatialVec>> {
    chain.check_len("joint velocities", qd)?;
    let n = chain.num_links();
    let expected = if n == 0 { 0 } else { n + 1 };
    if relative.len() != expected {
        return Err(DynamicsError::ShapeMismatch {
            what: "relative transforms",
            expected,
            actual: relative.len(),
        });
    }

    let mut twists: Vec<SpatialVec> = Vec::with_capacity(n);
    for (j, link) in chain.links().iter().enumerate() {
        let joint = link.screw_axis() * qd[j];
        let twist = match twists.last() {
            Some(prev) => relative[j].apply_twist(prev) + joint,
            None => joint,
        };
        twists.push(twist);
    }
    Ok(twists)
}

/// Twists of every link obtained from the twist equations through the solver.
///
/// Agrees with [`propagate_twists`]; kept as the equation-based route.
pub fn solve_twists(chain: &SerialChain, q: &[f64], qd: &[f64]) -> Result<Vec<SpatialVec>> {
    chain.check_len("joint velocities", qd)?;
    if chain.num_links() == 0 {
        return Err(DynamicsError::IllPosedSystem("chain has no links".to_string()));
    }
    let relative = chain.relative_transforms(Some(q))?;

    let mut system = LinearSystem::new();
    for (j, link) in chain.links().iter().enumerate() {
        system.push(link.twist_equation(j + 1, &relative[j], qd[j]));
    }
    let solution = system.solve()?;

    (1..=chain.num_links())
        .map(|j| {
            solution
                .spatial(Unknown::Twist(j))
                .ok_or_else(|| DynamicsError::IllPosedSystem(format!("no value for V{j}")))
        })
        .collect()
}

/// Configuration-dependent quantities shared by forward and inverse queries.
///
/// Computing this once and passing it to the `*_with_state` entry points
/// avoids repeating the kinematics for several queries at the same (q, q̇).
#[derive(Debug, Clone, PartialEq)]
pub struct ChainState {
    com_frames: Vec<Pose>,
    relative: Vec<Pose>,
    twists: Vec<SpatialVec>,
    qd: Vec<f64>,
}

impl ChainState {
    pub fn compute(chain: &SerialChain, q: &[f64], qd: &[f64]) -> Result<Self> {
        chain.check_len("joint positions", q)?;
        chain.check_len("joint velocities", qd)?;
        let com_frames = chain.com_frames(Some(q))?;
        let relative = chain.relative_transforms(Some(q))?;
        let twists = propagate_twists(chain, &relative, qd)?;
        debug!(links = chain.num_links(), "computed chain state");
        Ok(Self {
            com_frames,
            relative,
            twists,
            qd: qd.to_vec(),
        })
    }

    pub fn num_links(&self) -> usize {
        self.twists.len()
    }

    /// World pose of each COM frame.
    pub fn com_frames(&self) -> &[Pose] {
        &self.com_frames
    }

    /// N+1 relative transforms, as in [`SerialChain::relative_transforms`].
    pub fn relative_transforms(&self) -> &[Pose] {
        &self.relative
    }

    /// Twist of each link in its COM frame.
    pub fn twists(&self) -> &[SpatialVec] {
        &self.twists
    }

    pub fn joint_velocities(&self) -> &[f64] {
        &self.qd
    }

    /// Fail unless this state was computed for a chain with `chain`'s link count.
    pub(crate) fn check_chain(&self, chain: &SerialChain) -> Result<()> {
        if self.num_links() == chain.num_links() {
            Ok(())
        } else {
            Err(DynamicsError::ShapeMismatch {
                what: "chain state links",
                expected: chain.num_links(),
                actual: self.num_links(),
            })
        }
    }

    /// Context of link `j` (0-based), with world gravity rotated into its COM frame.
    pub(crate) fn link_state(&self, j: usize, gravity: Option<&Vec3>) -> LinkState {
        LinkState {
            index: j + 1,
            from_previous: self.relative[j],
            to_next: self.relative[j + 1],
            joint_velocity: self.qd[j],
            twist: self.twists[j],
            gravity: gravity.map(|g| self.com_frames[j].rot.transpose() * g),
        }
    }

    /// Iterate links with their context.
    pub(crate) fn links<'a>(
        &'a self,
        chain: &'a SerialChain,
        gravity: Option<&'a Vec3>,
    ) -> impl Iterator<Item = (&'a LinkModel, LinkState)> + 'a {
        chain
            .links()
            .iter()
            .enumerate()
            .map(move |(j, link)| (link, self.link_state(j, gravity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_chains;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn planar_twists_at_rest_pose() {
        let chain = test_chains::rr();
        let state = ChainState::compute(&chain, &[0.0, 0.0], &[1.0, 1.0]).unwrap();
        let v = state.twists();
        // COM 1 sits at x = 3, COM 2 at x = 5 with the elbow at x = 2.
        assert_relative_eq!(v[0].angular(), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(v[0].linear(), Vec3::new(0.0, 3.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(v[1].angular(), Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(v[1].linear(), Vec3::new(0.0, 8.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn velocity_length_is_checked() {
        let chain = test_chains::rr();
        let rel = chain.relative_transforms(None).unwrap();
        assert_eq!(
            propagate_twists(&chain, &rel, &[1.0]),
            Err(DynamicsError::ShapeMismatch {
                what: "joint velocities",
                expected: 2,
                actual: 1,
            })
        );
        assert!(matches!(
            propagate_twists(&chain, &rel[..2], &[1.0, 1.0]),
            Err(DynamicsError::ShapeMismatch { what: "relative transforms", .. })
        ));
    }

    #[test]
    fn link_state_rotates_gravity() {
        let chain = test_chains::rr();
        let state = ChainState::compute(&chain, &[std::f64::consts::FRAC_PI_2, 0.0], &[0.0, 0.0])
            .unwrap();
        let g = Vec3::new(0.0, -9.8, 0.0);
        let s = state.link_state(0, Some(&g));
        assert_eq!(s.index, 1);
        // Link 1 points along world y, so world -y is its local -x.
        assert_relative_eq!(s.gravity.unwrap(), Vec3::new(-9.8, 0.0, 0.0), epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn solver_agrees_with_closed_form(
            q in prop::collection::vec(-3.0f64..3.0, 3),
            qd in prop::collection::vec(-2.0f64..2.0, 3),
        ) {
            let chain = test_chains::rpr();
            let rel = chain.relative_transforms(Some(q.as_slice())).unwrap();
            let closed = propagate_twists(&chain, &rel, &qd).unwrap();
            let solved = solve_twists(&chain, &q, &qd).unwrap();
            for (a, b) in closed.iter().zip(&solved) {
                prop_assert!((a.data - b.data).norm() < 1e-9);
            }
        }
    }
}
