//! linkdyn: forward and inverse dynamics of serial-link manipulators.
//!
//! This is the umbrella crate that re-exports the core types from the
//! sub-crates and provides reference robot models.

pub use linkdyn_linear::{self, LinearEquation, LinearSystem, SolveError, Solution, Unknown};
pub use linkdyn_math::{self, GRAVITY, Pose, SpatialInertia, SpatialVec, Vec3, Vec6};
pub use linkdyn_model::{
    self, ChainBuilder, DhParameters, DhTable, JointType, LinkModel, LinkTree, ModelError,
    SerialChain,
};
pub use linkdyn_rigid::{
    self, ChainState, DynamicsError, DynamicsOptions, LinkEquations, forward_dynamics,
    forward_dynamics_with_state, inverse_dynamics, inverse_dynamics_with_state, kinetic_energy,
    potential_energy,
};

pub mod robots;
