//! Error types for linkdyn-rigid.

use linkdyn_linear::SolveError;
use linkdyn_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DynamicsError {
    #[error("{what}: expected {expected} values, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("ill-posed dynamics system: {0}")]
    IllPosedSystem(String),

    #[error(transparent)]
    Model(ModelError),
}

impl From<ModelError> for DynamicsError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ShapeMismatch {
                what,
                expected,
                actual,
            } => DynamicsError::ShapeMismatch {
                what,
                expected,
                actual,
            },
            other => DynamicsError::Model(other),
        }
    }
}

impl From<SolveError> for DynamicsError {
    fn from(err: SolveError) -> Self {
        DynamicsError::IllPosedSystem(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DynamicsError>;
