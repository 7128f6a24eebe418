//! Unconstrained least squares on top of nalgebra's QR.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::math::{ensure_no_zero_column, ensure_rhs_len, qr_lssolve};

/// Solution of `min ||A x - b||` together with the residual `b - A x`.
#[derive(Debug, Clone)]
pub struct LeastSquaresSolution {
    pub x: DVector<f64>,
    pub residual: DVector<f64>,
}

/// Solve `min ||A x - b||` by Householder QR.
///
/// `a` is left untouched; the factorization works on a private, column-scaled
/// copy, so entries anywhere in the normal `f64` range are handled.
/// Fails with `SingularMatrix` before factoring if `a` has a zero column, and
/// with `NumericalFailure` if the factorization turns out rank deficient.
pub fn solve_least_squares(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<LeastSquaresSolution, AppError> {
    ensure_no_zero_column(a)?;
    ensure_rhs_len(a, b)?;
    debug!("solve_least_squares: {}x{} design matrix", a.nrows(), a.ncols());

    let (x, residual) = qr_lssolve(a.clone(), b)?;
    Ok(LeastSquaresSolution { x, residual })
}
