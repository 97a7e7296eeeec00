//! Linear systems over typed unknowns.
//!
//! Each `LinearEquation` is an exact equality constraint `Σ Aᵢ xᵢ = b` over
//! named unknowns (6D twists/wrenches or scalar joint quantities). A
//! `LinearSystem` maps the unknowns to dense slots, assembles the sparse
//! coefficient matrix, and returns the unique solution when it exists.

pub mod equation;
pub mod error;
pub mod system;
pub mod unknown;

pub use equation::{LinearEquation, column, mat6, row, vec6};
pub use error::{Result, SolveError};
pub use system::{LinearSystem, Solution};
pub use unknown::Unknown;
