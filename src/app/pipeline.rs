//! Shared solve pipeline used by both `lsq solve` and `lsq demo`.
//!
//! problem -> route to solver -> diagnostics

use chrono::Utc;
use log::debug;
use nalgebra::DVector;
use rayon::prelude::*;

use crate::domain::{Problem, SolutionFile, SolveMode};
use crate::error::AppError;
use crate::report::{explicit_residual, max_constraint_violation};
use crate::solve::{solve_constrained_least_squares, solve_least_squares};

/// Solver output plus diagnostics.
#[derive(Debug, Clone)]
pub struct SolveOutput {
    pub mode: SolveMode,
    pub n_constraints: usize,
    /// Vector exactly as returned by the solver (negated for constrained problems).
    pub x: DVector<f64>,
    /// Residual of the minimiser `x* = sign * x`, i.e. `b - A x*`.
    pub residual: DVector<f64>,
    pub residual_norm: f64,
    pub max_constraint_violation: f64,
}

/// Route a problem to the matching solver and compute diagnostics.
pub fn solve_problem(problem: &Problem) -> Result<SolveOutput, AppError> {
    let mode = problem.mode();
    debug!(
        "solve_problem: {:?}, a={}x{}, constraints={}",
        mode,
        problem.a.nrows(),
        problem.a.ncols(),
        problem.constraints.nrows()
    );

    let (x, residual) = match mode {
        SolveMode::Unconstrained => {
            let sol = solve_least_squares(&problem.a, &problem.b)?;
            (sol.x, sol.residual)
        }
        SolveMode::Constrained => {
            let x = solve_constrained_least_squares(&problem.a, &problem.b, &problem.constraints)?;
            let minimiser = &x * mode.output_sign();
            let residual = explicit_residual(&problem.a, &problem.b, &minimiser);
            (x, residual)
        }
    };

    let residual_norm = residual.norm();
    let max_constraint_violation = max_constraint_violation(&problem.constraints, &x);

    Ok(SolveOutput {
        mode,
        n_constraints: problem.constraints.nrows(),
        x,
        residual,
        residual_norm,
        max_constraint_violation,
    })
}

/// Solve independent problems in parallel; results keep input order.
pub fn solve_many(problems: &[Problem]) -> Vec<Result<SolveOutput, AppError>> {
    problems.par_iter().map(solve_problem).collect()
}

pub fn to_solution_file(output: &SolveOutput) -> SolutionFile {
    SolutionFile {
        tool: "lsq".to_string(),
        solved_at: Utc::now(),
        mode: output.mode,
        x: output.x.iter().copied().collect(),
        residual: output.residual.iter().copied().collect(),
        residual_norm: output.residual_norm,
        max_constraint_violation: output.max_constraint_violation,
    }
}
