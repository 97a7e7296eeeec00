//! Model types for linkdyn.
//!
//! `LinkModel` is the static description of one link (DH geometry, mass, inertia).
//! `SerialChain` is an immutable, ordered sequence of links between a base and a tool frame.

pub mod chain;
pub mod dh;
pub mod error;
pub mod joint;
pub mod link;
pub mod tree;

pub use chain::{ChainBuilder, SerialChain};
pub use dh::{AngleUnit, DhParameters, DhRow, DhTable, PoseConfig};
pub use error::{ModelError, Result};
pub use joint::JointType;
pub use link::LinkModel;
pub use tree::LinkTree;
