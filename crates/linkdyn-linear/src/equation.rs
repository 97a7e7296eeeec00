//! Exact linear equality constraints over typed unknowns.

use linkdyn_math::{DMat, DVec, Mat6, SpatialVec};

use crate::{Result, SolveError, Unknown};

/// `Σ Aᵢ xᵢ = b`, enforced exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearEquation {
    terms: Vec<(Unknown, DMat)>,
    rhs: DVec,
}

impl LinearEquation {
    /// Equation with no terms yet; add them with [`term`](Self::term).
    pub fn new(rhs: DVec) -> Self {
        Self {
            terms: Vec::new(),
            rhs,
        }
    }

    /// Add `coeff · unknown` to the left-hand side.
    pub fn term(mut self, unknown: Unknown, coeff: DMat) -> Self {
        self.terms.push((unknown, coeff));
        self
    }

    /// `A x = b`
    pub fn unary(x: Unknown, a: DMat, rhs: DVec) -> Self {
        Self::new(rhs).term(x, a)
    }

    /// `A x + B y = b`
    pub fn binary(x: Unknown, a: DMat, y: Unknown, b: DMat, rhs: DVec) -> Self {
        Self::new(rhs).term(x, a).term(y, b)
    }

    /// `A x + B y + C z = b`
    #[allow(clippy::too_many_arguments)]
    pub fn ternary(
        x: Unknown,
        a: DMat,
        y: Unknown,
        b: DMat,
        z: Unknown,
        c: DMat,
        rhs: DVec,
    ) -> Self {
        Self::new(rhs).term(x, a).term(y, b).term(z, c)
    }

    /// Number of scalar rows.
    pub fn rows(&self) -> usize {
        self.rhs.len()
    }

    pub fn terms(&self) -> &[(Unknown, DMat)] {
        &self.terms
    }

    pub fn rhs(&self) -> &DVec {
        &self.rhs
    }

    /// Coefficient block of `unknown`, if it appears.
    pub fn coefficient(&self, unknown: Unknown) -> Option<&DMat> {
        self.terms
            .iter()
            .find(|(u, _)| *u == unknown)
            .map(|(_, a)| a)
    }

    /// Check every block against the rhs height and the unknown's dimension.
    pub(crate) fn validate(&self, index: usize) -> Result<()> {
        if self.terms.is_empty() {
            return Err(SolveError::DimensionMismatch {
                index,
                detail: "equation has no terms".to_string(),
            });
        }
        for (unknown, coeff) in &self.terms {
            if coeff.nrows() != self.rows() || coeff.ncols() != unknown.dim() {
                return Err(SolveError::DimensionMismatch {
                    index,
                    detail: format!(
                        "coefficient of {unknown} is {}x{}, expected {}x{}",
                        coeff.nrows(),
                        coeff.ncols(),
                        self.rows(),
                        unknown.dim()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Residual `Σ Aᵢ xᵢ - b` for a candidate assignment.
    pub fn residual(&self, value_of: impl Fn(Unknown) -> Option<DVec>) -> Option<DVec> {
        let mut r = -self.rhs.clone();
        for (unknown, coeff) in &self.terms {
            r += coeff * value_of(*unknown)?;
        }
        Some(r)
    }
}

/// 6x6 block as a dynamic matrix.
pub fn mat6(m: &Mat6) -> DMat {
    DMat::from_column_slice(6, 6, m.as_slice())
}

/// Spatial vector as a 6x1 block.
pub fn column(v: &SpatialVec) -> DMat {
    DMat::from_column_slice(6, 1, v.data.as_slice())
}

/// Spatial vector as a 1x6 block.
pub fn row(v: &SpatialVec) -> DMat {
    DMat::from_row_slice(1, 6, v.data.as_slice())
}

/// Spatial vector as a dynamic rhs.
pub fn vec6(v: &SpatialVec) -> DVec {
    DVec::from_column_slice(v.data.as_slice())
}
