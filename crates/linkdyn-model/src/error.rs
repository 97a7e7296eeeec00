//! Error types for linkdyn-model.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("unsupported joint type: {0:?} (expected revolute or prismatic)")]
    UnsupportedJointType(String),

    #[error("{what} has length {actual}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("ambiguous link tree: {} leaves ({}), select one explicitly", leaves.len(), leaves.join(", "))]
    AmbiguousTree { leaves: Vec<String> },

    #[error("unknown link: {0}")]
    UnknownLink(String),

    #[error("parent cycle in link tree through {0}")]
    CyclicTree(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
