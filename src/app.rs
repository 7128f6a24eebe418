//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and environment defaults (`.env` supported)
//! - installs the logger
//! - loads or generates problems, solves them, prints reports
//! - writes optional exports

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use crate::cli::{Command, DemoArgs, SolveArgs};
use crate::domain::{DemoConfig, SolveConfig};
use crate::error::{AppError, ErrorKind};

pub mod pipeline;

/// Constraint tolerance when neither `--tol` nor `LSQ_CHECK_TOL` is given.
pub const DEFAULT_CHECK_TOL: f64 = 1e-8;

/// Entry point for the `lsq` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Solve(args) => handle_solve(&solve_config_from_args(&args)?),
        Command::Demo(args) => handle_demo(&demo_config_from_args(&args)?),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

fn handle_solve(config: &SolveConfig) -> Result<(), AppError> {
    let mut problems = Vec::with_capacity(config.files.len());
    for path in &config.files {
        problems.push(crate::io::read_problem_json(path)?);
    }
    info!("solving {} problem(s)", problems.len());

    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir).map_err(|e| {
            AppError::new(ErrorKind::Io, format!("Failed to create output dir '{}': {e}", dir.display()))
        })?;
    }

    let results = pipeline::solve_many(&problems);

    let mut first_err = None;
    for (path, result) in config.files.iter().zip(results) {
        match result {
            Ok(output) => {
                println!(
                    "{}",
                    crate::report::format_solve_summary(&path.display().to_string(), &output, config.check_tol)
                );
                if let Some(dir) = &config.output_dir {
                    let out_path = crate::io::solution_path(dir, path);
                    crate::io::write_solution_json(&out_path, &pipeline::to_solution_file(&output))?;
                    info!("wrote {}", out_path.display());
                }
            }
            Err(err) => {
                error!("{}: {err}", path.display());
                first_err.get_or_insert(err);
            }
        }
    }

    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn handle_demo(config: &DemoConfig) -> Result<(), AppError> {
    let sample = crate::data::generate_paired_problem(config)?;
    if let Some(path) = &config.export {
        crate::io::write_problem_json(path, &sample.problem)?;
        info!("wrote {}", path.display());
    }

    let output = pipeline::solve_problem(&sample.problem)?;
    println!("{}", crate::report::format_demo_summary(&sample, &output, config));
    Ok(())
}

pub fn solve_config_from_args(args: &SolveArgs) -> Result<SolveConfig, AppError> {
    Ok(SolveConfig {
        files: args.files.clone(),
        output_dir: args
            .output
            .clone()
            .or_else(|| std::env::var_os("LSQ_OUTPUT_DIR").map(PathBuf::from)),
        check_tol: resolve_check_tol(args.tol)?,
    })
}

pub fn demo_config_from_args(args: &DemoArgs) -> Result<DemoConfig, AppError> {
    Ok(DemoConfig {
        pairs: args.pairs,
        tied: args.tied,
        rows: args.rows,
        seed: args.seed,
        noise: args.noise,
        export: args.export.clone(),
        check_tol: resolve_check_tol(args.tol)?,
    })
}

/// `--tol`, else `LSQ_CHECK_TOL`, else [`DEFAULT_CHECK_TOL`].
fn resolve_check_tol(cli: Option<f64>) -> Result<f64, AppError> {
    let tol = match cli {
        Some(t) => t,
        None => match std::env::var("LSQ_CHECK_TOL") {
            Ok(raw) => raw.trim().parse::<f64>().map_err(|e| {
                AppError::new(ErrorKind::InvalidInput, format!("Invalid LSQ_CHECK_TOL '{raw}': {e}"))
            })?,
            Err(_) => DEFAULT_CHECK_TOL,
        },
    };
    if !(tol.is_finite() && tol > 0.0) {
        return Err(AppError::new(ErrorKind::InvalidInput, format!("Tolerance must be > 0, got {tol}.")));
    }
    Ok(tol)
}
