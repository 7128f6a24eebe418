//! Least-squares solvers.
//!
//! - `unconstrained`: plain QR least squares, returns the residual as well
//! - `null_space`: orthogonal basis split into constrained / free directions
//! - `constrained`: null-space method for `min ||Ax - b||` subject to `C x = 0`

pub mod constrained;
pub mod null_space;
pub mod unconstrained;

pub use constrained::*;
pub use null_space::*;
pub use unconstrained::*;
