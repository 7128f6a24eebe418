//! Reporting utilities: solution diagnostics and formatted terminal output.

pub mod format;

pub use format::*;

use nalgebra::{DMatrix, DVector};

/// Largest `|row · x|` over the constraint rows; `0` when there are none.
pub fn max_constraint_violation(constraints: &DMatrix<f64>, x: &DVector<f64>) -> f64 {
    if constraints.nrows() == 0 {
        return 0.0;
    }
    (constraints * x).amax()
}

/// `b - A x`, formed explicitly.
pub fn explicit_residual(a: &DMatrix<f64>, b: &DVector<f64>, x: &DVector<f64>) -> DVector<f64> {
    b - a * x
}
