//! Terminal formatting.
//!
//! Kept apart from the solvers so output changes stay localized.

use crate::app::pipeline::SolveOutput;
use crate::data::SampleProblem;
use crate::domain::DemoConfig;

/// Summary block for one solved problem.
pub fn format_solve_summary(label: &str, output: &SolveOutput, check_tol: f64) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {label} ===\n"));
    out.push_str(&format!(
        "Mode: {} | unknowns={} | constraints={}\n",
        output.mode.display_name(),
        output.x.len(),
        output.n_constraints,
    ));
    out.push_str(&format!("Residual norm: {:.6e}\n", output.residual_norm));

    if output.n_constraints > 0 {
        let flag = if output.max_constraint_violation <= check_tol { "ok" } else { "VIOLATED" };
        out.push_str(&format!(
            "Max |Cx|: {:.3e} (tol {:.1e}, {flag})\n",
            output.max_constraint_violation, check_tol
        ));
    }

    out.push_str("x:\n");
    for (i, v) in output.x.iter().enumerate() {
        out.push_str(&format!("  [{i:>3}] {v:>16.9}\n"));
    }

    out
}

/// Summary for `lsq demo`: the regular block plus recovery against the ground truth.
pub fn format_demo_summary(sample: &SampleProblem, output: &SolveOutput, config: &DemoConfig) -> String {
    let mut out = format_solve_summary(
        &format!("demo (pairs={}, tied={}, seed={})", config.pairs, config.tied, config.seed),
        output,
        config.check_tol,
    );

    let sign = output.mode.output_sign();
    let recovery = sample
        .truth
        .iter()
        .zip(output.x.iter())
        .map(|(t, x)| (sign * x - t).abs())
        .fold(0.0_f64, f64::max);
    out.push_str(&format!(
        "Recovery: max |x* - truth| = {recovery:.3e} (noise sigma {:.3e}, output sign {sign:+})\n",
        config.noise
    ));

    out
}
