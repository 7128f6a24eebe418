//! Numerical building blocks: Householder QR, the least-squares solve and
//! design-matrix checks.

pub mod householder;
pub mod lstsq;
pub mod validate;

pub use householder::*;
pub use lstsq::*;
pub use validate::*;
