//! Structural checks run before any factorization.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// Reject design matrices with an all-zero column.
///
/// A zero column leaves the corresponding unknown unidentifiable, so the
/// normal equations are singular in that direction. Every element must be
/// exactly zero in magnitude for the column to count.
pub fn ensure_no_zero_column(a: &DMatrix<f64>) -> Result<(), AppError> {
    for (j, col) in a.column_iter().enumerate() {
        if col.iter().all(|v| v.abs() == 0.0) {
            return Err(AppError::singular(format!(
                "zero column in design matrix (column {j})"
            )));
        }
    }
    Ok(())
}

/// Reject a right-hand side whose length differs from the row count of `a`.
pub fn ensure_rhs_len(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<(), AppError> {
    if a.nrows() != b.len() {
        return Err(AppError::dimension(format!(
            "design matrix has {} rows but right-hand side has length {}",
            a.nrows(),
            b.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn accepts_matrix_without_zero_columns() {
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1e-300, 0.0, 0.0]);
        assert!(ensure_no_zero_column(&a).is_ok());
    }

    #[test]
    fn rejects_zero_column_and_names_it() {
        let a = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 2.0, 3.0, -0.0, 4.0]);
        let err = ensure_no_zero_column(&a).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SingularMatrix);
        assert!(err.message().contains("column 1"), "{err}");
    }

    #[test]
    fn rhs_length_must_match_rows() {
        let a = DMatrix::<f64>::identity(3, 2);
        assert!(ensure_rhs_len(&a, &DVector::zeros(3)).is_ok());
        let err = ensure_rhs_len(&a, &DVector::zeros(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }
}
