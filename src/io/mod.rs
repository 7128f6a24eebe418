//! Input/output helpers.
//!
//! - problem JSON read/write (`problem`)
//! - solution JSON export (`solution`)

pub mod problem;
pub mod solution;

pub use problem::*;
pub use solution::*;
