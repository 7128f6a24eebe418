//! Export solutions to JSON.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::domain::SolutionFile;
use crate::error::{AppError, ErrorKind};

/// Write a solution JSON file.
pub fn write_solution_json(path: &Path, solution: &SolutionFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(ErrorKind::Io, format!("Failed to create solution JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), solution)
        .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to write solution JSON: {e}")))?;
    Ok(())
}

/// `<dir>/<input stem>.solution.json`.
pub fn solution_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "problem".to_string());
    dir.join(format!("{stem}.solution.json"))
}
