//! Read, solve and report.

use crate::cli::{Cli, Mode};
use crate::input::{read_system, LineSource};
use anyhow::{Context, Result};
use linprop::{
    render_system, render_trace, solve_numeric, solve_symbolic, CellFormat, PlainFormat,
    RoundedFormat, Scalar, Solution, System,
};
use std::io::Write;

/// Solve the system supplied by `source` and write the report to `out`.
pub fn run<S, W>(cli: &Cli, source: &mut S, prompt: Option<&mut dyn Write>, out: &mut W) -> Result<()>
where
    S: LineSource + ?Sized,
    W: Write,
{
    match cli.mode {
        Mode::Symbolic => {
            let system: System<i64> =
                read_system(source, prompt).context("failed to read integer system")?;
            let solution = solve_symbolic(system.clone(), Some(cli.solver_options()))
                .context("symbolic propagation failed")?;
            report(&system, &solution, &PlainFormat, cli.trace, out)
        }
        Mode::Numeric => {
            let system: System<f64> =
                read_system(source, prompt).context("failed to read floating-point system")?;
            let solution = solve_numeric(system.clone(), Some(cli.solver_options()))
                .context("numeric propagation failed")?;
            report(
                &system,
                &solution,
                &RoundedFormat::new(cli.precision),
                cli.trace,
                out,
            )
        }
    }
}

fn report<T, F, W>(
    input: &System<T>,
    solution: &Solution<T>,
    format: &F,
    trace: bool,
    out: &mut W,
) -> Result<()>
where
    T: Scalar,
    F: CellFormat<T>,
    W: Write,
{
    if trace {
        out.write_all(render_trace(&solution.trace, format).as_bytes())?;
    } else {
        out.write_all(render_system(&solution.system, format).as_bytes())?;
    }

    let unresolved = solution.system.unknown_constants();
    writeln!(
        out,
        "{} resolution(s), {} unknown(s) remaining",
        solution.resolutions.len(),
        unresolved.len()
    )?;
    if let Some(residuals) = solution.system.residuals(input) {
        let text: Vec<String> = residuals.into_iter().map(|r| format.format_value(r)).collect();
        writeln!(out, "residuals: {}", text.join(" "))?;
    }
    Ok(())
}
