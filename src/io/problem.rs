//! Read/write problem JSON files.
//!
//! The schema is defined by `domain::ProblemFile`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::domain::{Problem, ProblemFile};
use crate::error::{AppError, ErrorKind};

/// Read and validate a problem JSON file.
pub fn read_problem_json(path: &Path) -> Result<Problem, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(ErrorKind::Io, format!("Failed to open problem JSON '{}': {e}", path.display()))
    })?;
    let raw: ProblemFile = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::new(
            ErrorKind::InvalidInput,
            format!("Invalid problem JSON '{}': {e}", path.display()),
        )
    })?;
    Problem::from_file(&raw)
        .map_err(|e| AppError::new(e.kind(), format!("{}: {e}", path.display())))
}

/// Write a problem JSON file.
pub fn write_problem_json(path: &Path, problem: &Problem) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(ErrorKind::Io, format!("Failed to create problem JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), &problem.to_file())
        .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to write problem JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{DMatrix, DVector};

    #[test]
    fn written_problem_reads_back_identically() {
        let problem = Problem {
            a: DMatrix::from_row_slice(3, 2, &[1.0, 0.5, -2.0, 1.0, 0.25, 3.0]),
            b: DVector::from_row_slice(&[1.0, 2.0, 3.0]),
            constraints: DMatrix::from_row_slice(1, 2, &[1.0, -1.0]),
        };
        let path = std::env::temp_dir().join(format!("lsq_problem_{}.json", std::process::id()));

        write_problem_json(&path, &problem).unwrap();
        let back = read_problem_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back, problem);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_problem_json(Path::new("/nonexistent/lsq/problem.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
