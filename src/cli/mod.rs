//! Command-line parsing for the least-squares solver.
//!
//! Argument parsing and command dispatch stay separate from the numerical code.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lsq", version, about = "Linear least squares with optional equality constraints")]
pub struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve one or more problem JSON files.
    ///
    /// Files with a non-empty `constraints` array use the null-space method;
    /// the others use plain QR least squares.
    Solve(SolveArgs),
    /// Generate a synthetic paired-halves problem, solve it, and report recovery.
    Demo(DemoArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct SolveArgs {
    /// Problem JSON files.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory for `<name>.solution.json` outputs (default: `LSQ_OUTPUT_DIR`, else none).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Constraint-violation tolerance used to flag solutions (default: `LSQ_CHECK_TOL`, else 1e-8).
    #[arg(long)]
    pub tol: Option<f64>,
}

#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Number of paired unknowns (the problem has twice as many).
    #[arg(short = 'p', long, default_value_t = 4)]
    pub pairs: usize,

    /// Number of pairs tied together by an equality constraint.
    #[arg(short = 't', long, default_value_t = 1)]
    pub tied: usize,

    /// Number of observations (rows of the design matrix).
    #[arg(short = 'm', long, default_value_t = 24)]
    pub rows: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Standard deviation of Gaussian noise added to the observations.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Write the generated problem to this JSON file.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Constraint-violation tolerance used to flag the solution.
    #[arg(long)]
    pub tol: Option<f64>,
}
