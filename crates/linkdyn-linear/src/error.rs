//! Error types for linkdyn-linear.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    #[error("linear system has no equations")]
    Empty,

    #[error("equation {index}: {detail}")]
    DimensionMismatch { index: usize, detail: String },

    #[error("linear system is not square: {rows} equation rows for {cols} unknown components")]
    NotSquare { rows: usize, cols: usize },

    #[error("linear system is singular or inconsistent (pivot ratio {pivot_ratio:.3e}, residual {residual:.3e})")]
    Singular { pivot_ratio: f64, residual: f64 },
}

pub type Result<T> = std::result::Result<T, SolveError>;
