//! Shared domain types.
//!
//! File schemas are plain row-major `Vec<Vec<f64>>` so problems can be written
//! by hand or by any JSON-capable tool; they are converted to nalgebra
//! matrices once, on load.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Which solver a problem is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveMode {
    /// No constraint rows: plain QR least squares.
    Unconstrained,
    /// At least one constraint row: null-space method.
    Constrained,
}

impl SolveMode {
    /// Sign relating the returned vector to the minimiser of `||Ax - b||`.
    ///
    /// The constrained solver returns the negated minimiser.
    pub fn output_sign(self) -> f64 {
        match self {
            SolveMode::Unconstrained => 1.0,
            SolveMode::Constrained => -1.0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SolveMode::Unconstrained => "unconstrained",
            SolveMode::Constrained => "constrained",
        }
    }
}

/// Problem file schema.
///
/// `a` is row-major (`m` rows of `n` entries), `b` has `m` entries, and each
/// row of `constraints` is one equation `row · x = 0` over the `n` unknowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemFile {
    pub a: Vec<Vec<f64>>,
    pub b: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Vec<f64>>,
}

/// In-memory least-squares problem `min ||Ax - b||` s.t. `C x = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
    /// `k x n`; `k = 0` means unconstrained.
    pub constraints: DMatrix<f64>,
}

impl Problem {
    pub fn unconstrained(a: DMatrix<f64>, b: DVector<f64>) -> Self {
        let n = a.ncols();
        Self {
            a,
            b,
            constraints: DMatrix::zeros(0, n),
        }
    }

    pub fn mode(&self) -> SolveMode {
        if self.constraints.nrows() == 0 {
            SolveMode::Unconstrained
        } else {
            SolveMode::Constrained
        }
    }

    pub fn n_unknowns(&self) -> usize {
        self.a.ncols()
    }

    pub fn from_file(file: &ProblemFile) -> Result<Self, AppError> {
        let a = rows_to_matrix(&file.a, None, "a")?;
        if a.nrows() == 0 || a.ncols() == 0 {
            return Err(AppError::new(ErrorKind::InvalidInput, "design matrix `a` is empty"));
        }
        let n = a.ncols();
        let constraints = rows_to_matrix(&file.constraints, Some(n), "constraints")?;
        Ok(Self {
            a,
            b: DVector::from_column_slice(&file.b),
            constraints,
        })
    }

    pub fn to_file(&self) -> ProblemFile {
        ProblemFile {
            a: matrix_to_rows(&self.a),
            b: self.b.iter().copied().collect(),
            constraints: matrix_to_rows(&self.constraints),
        }
    }
}

fn rows_to_matrix(rows: &[Vec<f64>], width: Option<usize>, label: &str) -> Result<DMatrix<f64>, AppError> {
    let width = match (width, rows.first()) {
        (Some(w), _) => w,
        (None, Some(first)) => first.len(),
        (None, None) => 0,
    };
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(AppError::new(
                ErrorKind::InvalidInput,
                format!("`{label}` row {i} has {} entries, expected {width}", row.len()),
            ));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(AppError::new(
                ErrorKind::InvalidInput,
                format!("`{label}` row {i} contains a non-finite value"),
            ));
        }
    }
    Ok(DMatrix::from_fn(rows.len(), width, |i, j| rows[i][j]))
}

fn matrix_to_rows(m: &DMatrix<f64>) -> Vec<Vec<f64>> {
    m.row_iter().map(|row| row.iter().copied().collect()).collect()
}

/// Solution file schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionFile {
    pub tool: String,
    pub solved_at: DateTime<Utc>,
    pub mode: SolveMode,
    pub x: Vec<f64>,
    pub residual: Vec<f64>,
    pub residual_norm: f64,
    pub max_constraint_violation: f64,
}

/// Configuration for `lsq solve`.
#[derive(Debug, Clone)]
pub struct SolveConfig {
    pub files: Vec<PathBuf>,
    /// Directory receiving `<stem>.solution.json` per input.
    pub output_dir: Option<PathBuf>,
    /// Largest acceptable `|C x|` entry before a solution is flagged.
    pub check_tol: f64,
}

/// Configuration for `lsq demo`.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Number of paired unknowns; the problem has `2 * pairs` unknowns.
    pub pairs: usize,
    /// How many of the pairs are tied together by a constraint.
    pub tied: usize,
    pub rows: usize,
    pub seed: u64,
    /// Standard deviation of the observation noise added to `b`.
    pub noise: f64,
    pub export: Option<PathBuf>,
    pub check_tol: f64,
}
