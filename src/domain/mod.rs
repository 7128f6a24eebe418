//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the in-memory least-squares problem (`Problem`) and its solve mode
//! - the on-disk problem/solution schemas (`ProblemFile`, `SolutionFile`)
//! - run configuration for the CLI (`SolveConfig`, `DemoConfig`)

pub mod types;

pub use types::*;
