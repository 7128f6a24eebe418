//! Synthetic paired-halves problems.
//!
//! The unknown vector has `2 * pairs` entries split into two halves; entry `i`
//! of the first half is paired with entry `i` of the second. The first `tied`
//! pairs are constrained equal (`x_i - x_{pairs+i} = 0`), the rest are free.
//! A ground truth satisfying the constraints is drawn at random and `b` is
//! produced from it with optional Gaussian noise.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use nalgebra::{DMatrix, DVector};

use crate::domain::{DemoConfig, Problem};
use crate::error::{AppError, ErrorKind};

#[derive(Debug, Clone)]
pub struct SampleProblem {
    pub problem: Problem,
    /// Constrained minimiser in the noise-free case.
    pub truth: DVector<f64>,
}

pub fn generate_paired_problem(config: &DemoConfig) -> Result<SampleProblem, AppError> {
    if config.pairs == 0 {
        return Err(AppError::new(ErrorKind::InvalidInput, "Number of pairs must be > 0."));
    }
    if config.tied > config.pairs {
        return Err(AppError::new(
            ErrorKind::InvalidInput,
            format!("Cannot tie {} pairs out of {}.", config.tied, config.pairs),
        ));
    }
    let n = 2 * config.pairs;
    if config.rows < n {
        return Err(AppError::new(
            ErrorKind::InvalidInput,
            format!("Need at least {n} rows for {n} unknowns, got {}.", config.rows),
        ));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(ErrorKind::InvalidInput, "Noise level must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(ErrorKind::InvalidInput, format!("Distribution error: {e}")))?;

    let a = DMatrix::from_fn(config.rows, n, |_, _| normal.sample(&mut rng));

    let mut constraints = DMatrix::<f64>::zeros(config.tied, n);
    for i in 0..config.tied {
        constraints[(i, i)] = 1.0;
        constraints[(i, config.pairs + i)] = -1.0;
    }

    let mut truth = DVector::from_fn(n, |_, _| normal.sample(&mut rng));
    for i in 0..config.tied {
        truth[config.pairs + i] = truth[i];
    }

    let mut b = &a * &truth;
    if config.noise > 0.0 {
        for v in b.iter_mut() {
            *v += config.noise * normal.sample(&mut rng);
        }
    }

    Ok(SampleProblem {
        problem: Problem { a, b, constraints },
        truth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DemoConfig {
        DemoConfig {
            pairs: 4,
            tied: 2,
            rows: 20,
            seed: 42,
            noise: 0.0,
            export: None,
            check_tol: 1e-8,
        }
    }

    #[test]
    fn generated_problem_has_paired_shape() {
        let sample = generate_paired_problem(&config()).unwrap();
        let p = &sample.problem;
        assert_eq!(p.a.shape(), (20, 8));
        assert_eq!(p.b.len(), 20);
        assert_eq!(p.constraints.shape(), (2, 8));
        assert_eq!(p.constraints[(1, 1)], 1.0);
        assert_eq!(p.constraints[(1, 5)], -1.0);
        assert!((&p.constraints * &sample.truth).amax() == 0.0);
    }

    #[test]
    fn same_seed_same_problem() {
        let first = generate_paired_problem(&config()).unwrap();
        let second = generate_paired_problem(&config()).unwrap();
        assert_eq!(first.problem, second.problem);

        let mut other = config();
        other.seed = 7;
        let third = generate_paired_problem(&other).unwrap();
        assert_ne!(first.problem.a, third.problem.a);
    }

    #[test]
    fn too_few_rows_are_rejected() {
        let mut cfg = config();
        cfg.rows = 5;
        let err = generate_paired_problem(&cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
