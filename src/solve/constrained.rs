//! Equality-constrained least squares by the null-space method.
//!
//! Given `Q` from [`build_null_space_basis`], write `x = Q y` and split
//! `y = [y1; y2]` with `y1` (length `k`) along the constraint normals.
//! The constraints force `y1 = 0`, so only `y2` is fitted:
//!
//! ```text
//! A Q = [A1 A2],   min ||A2 y2 - b||,   x = -(Q [0; y2])
//! ```
//!
//! The final negation is part of the established output convention: callers
//! receive the negated constrained minimiser and set up `b` accordingly.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::math::{ensure_no_zero_column, ensure_rhs_len, qr_lssolve};
use crate::solve::null_space::build_null_space_basis;

/// Solve `min ||A x - b||` subject to `C x = 0` (returned with negated sign).
///
/// `a`, `b` and `c` are borrowed; all working storage is private. Fails with
/// `SingularMatrix` if `a` has a zero column, `DimensionMismatch` for
/// inconsistent shapes, and `NumericalFailure` if the reduced problem is
/// rank deficient.
pub fn solve_constrained_least_squares(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    c: &DMatrix<f64>,
) -> Result<DVector<f64>, AppError> {
    ensure_no_zero_column(a)?;
    ensure_rhs_len(a, b)?;

    let (m, n) = a.shape();
    let k = c.nrows();
    if c.ncols() != n {
        return Err(AppError::dimension(format!(
            "constraint matrix has {} columns but the design matrix has {n}",
            c.ncols()
        )));
    }

    let q = build_null_space_basis(c)?;

    // Rotate the unknowns: the first k columns now act on constrained directions.
    let rotated = a * &q;
    let free = rotated.columns(k, n - k).into_owned();
    debug!("solve_constrained_least_squares: reduced problem {m}x{}", n - k);

    let (z, _residual) = qr_lssolve(free, b)?;

    let mut y = DVector::<f64>::zeros(n);
    y.rows_mut(k, n - k).copy_from(&z);

    Ok(-(&q * y))
}
