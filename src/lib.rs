//! `lsq-nullspace` library crate.
//!
//! Linear least squares `min ||Ax - b||`, optionally subject to homogeneous
//! equality constraints `C x = 0`, solved by the null-space method on top of
//! Householder QR.
//!
//! The binary (`lsq`) is a thin wrapper around this library so that:
//!
//! - the solvers are testable without spawning processes
//! - the numerical core (`math`, `solve`) can be used on its own

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod solve;

pub use error::{AppError, ErrorKind};
pub use solve::{
    LeastSquaresSolution, build_null_space_basis, solve_constrained_least_squares, solve_least_squares,
};
