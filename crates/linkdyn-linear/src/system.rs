//! Assembly and solution of square linear systems.

use std::collections::BTreeMap;

use linkdyn_math::{DMat, DVec, SpatialVec, Vec6};
use nalgebra::DVectorView;
use nalgebra_sparse::CooMatrix;
use tracing::{debug, warn};

use crate::{LinearEquation, Result, SolveError, Unknown};

/// Smallest accepted ratio between the smallest and largest LU pivot.
const PIVOT_TOLERANCE: f64 = 1e-12;
/// Relative residual accepted after the solve.
const RESIDUAL_TOLERANCE: f64 = 1e-8;

/// Dense column slots, assigned in order of first appearance.
#[derive(Debug, Clone, Default)]
struct Layout {
    order: Vec<Unknown>,
    offsets: BTreeMap<Unknown, usize>,
    width: usize,
}

impl Layout {
    fn insert(&mut self, unknown: Unknown) {
        if !self.offsets.contains_key(&unknown) {
            self.offsets.insert(unknown, self.width);
            self.order.push(unknown);
            self.width += unknown.dim();
        }
    }
}

/// An ordered collection of exact equations.
#[derive(Debug, Clone, Default)]
pub struct LinearSystem {
    equations: Vec<LinearEquation>,
}

impl LinearSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, equation: LinearEquation) -> &mut Self {
        self.equations.push(equation);
        self
    }

    pub fn extend(&mut self, equations: impl IntoIterator<Item = LinearEquation>) -> &mut Self {
        self.equations.extend(equations);
        self
    }

    /// Number of equations (blocks, not scalar rows).
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    pub fn equations(&self) -> &[LinearEquation] {
        &self.equations
    }

    /// Total scalar rows.
    pub fn num_rows(&self) -> usize {
        self.equations.iter().map(LinearEquation::rows).sum()
    }

    /// Distinct unknowns in order of first appearance.
    pub fn unknowns(&self) -> Vec<Unknown> {
        self.layout().order
    }

    fn layout(&self) -> Layout {
        let mut layout = Layout::default();
        for eq in &self.equations {
            for (unknown, _) in eq.terms() {
                layout.insert(*unknown);
            }
        }
        layout
    }

    /// Solve for every unknown.
    ///
    /// The system must be square and have a unique solution; singular or
    /// inconsistent systems are rejected rather than answered in a
    /// least-squares sense.
    pub fn solve(&self) -> Result<Solution> {
        if self.equations.is_empty() {
            return Err(SolveError::Empty);
        }
        for (index, eq) in self.equations.iter().enumerate() {
            eq.validate(index)?;
        }

        let layout = self.layout();
        let rows = self.num_rows();
        let cols = layout.width;
        if rows != cols {
            warn!(rows, cols, "rejecting non-square system");
            return Err(SolveError::NotSquare { rows, cols });
        }

        let mut coo = CooMatrix::new(rows, cols);
        let mut b = DVec::zeros(rows);
        let mut row0 = 0;
        for eq in &self.equations {
            for (unknown, coeff) in eq.terms() {
                let col0 = layout.offsets[unknown];
                for c in 0..coeff.ncols() {
                    for r in 0..coeff.nrows() {
                        let v = coeff[(r, c)];
                        if v != 0.0 {
                            coo.push(row0 + r, col0 + c, v);
                        }
                    }
                }
            }
            b.rows_mut(row0, eq.rows()).copy_from(eq.rhs());
            row0 += eq.rows();
        }

        let a = DMat::from(&coo);
        let lu = a.clone().full_piv_lu();
        let pivots = lu.u().diagonal().map(f64::abs);
        let pivot_ratio = if pivots.max() > 0.0 {
            pivots.min() / pivots.max()
        } else {
            0.0
        };
        if pivot_ratio < PIVOT_TOLERANCE {
            warn!(rows, pivot_ratio, "rejecting singular system");
            return Err(SolveError::Singular {
                pivot_ratio,
                residual: f64::INFINITY,
            });
        }

        let Some(x) = lu.solve(&b) else {
            warn!(rows, pivot_ratio, "LU solve failed");
            return Err(SolveError::Singular {
                pivot_ratio,
                residual: f64::INFINITY,
            });
        };
        let residual = (&a * &x - &b).norm();
        if !residual.is_finite() || residual > RESIDUAL_TOLERANCE * (1.0 + b.norm()) {
            warn!(rows, pivot_ratio, residual, "rejecting inaccurate solution");
            return Err(SolveError::Singular {
                pivot_ratio,
                residual,
            });
        }

        debug!(
            rows,
            unknowns = layout.order.len(),
            nnz = coo.nnz(),
            pivot_ratio,
            residual,
            "solved linear system"
        );
        Ok(Solution {
            offsets: layout.offsets,
            values: x,
        })
    }
}

/// Values of every unknown of a solved system.
#[derive(Debug, Clone)]
pub struct Solution {
    offsets: BTreeMap<Unknown, usize>,
    values: DVec,
}

impl Solution {
    /// Components of `unknown`, if it was part of the system.
    pub fn get(&self, unknown: Unknown) -> Option<DVectorView<'_, f64>> {
        let offset = *self.offsets.get(&unknown)?;
        Some(self.values.rows(offset, unknown.dim()))
    }

    /// A 6D unknown as a spatial vector.
    pub fn spatial(&self, unknown: Unknown) -> Option<SpatialVec> {
        if unknown.dim() != 6 {
            return None;
        }
        let v = self.get(unknown)?;
        Some(SpatialVec::from_vec6(Vec6::from_iterator(v.iter().copied())))
    }

    /// A scalar unknown.
    pub fn scalar(&self, unknown: Unknown) -> Option<f64> {
        if unknown.dim() != 1 {
            return None;
        }
        self.get(unknown).map(|v| v[0])
    }

    /// The full solution vector in column order.
    pub fn values(&self) -> &DVec {
        &self.values
    }
}
