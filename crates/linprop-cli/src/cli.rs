use clap::{Parser, ValueEnum};
use linprop::SolverOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linprop")]
#[command(version, about = "Resolve unknowns in a sparse linear system by fixed-point propagation")]
pub struct Cli {
    /// Input file; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Solving mode
    #[arg(short, long, value_enum, default_value_t = Mode::Symbolic)]
    pub mode: Mode,

    /// Display rounding for numeric mode
    #[arg(long, default_value_t = 0.01, value_parser = parse_precision)]
    pub precision: f64,

    /// Abort after this many resolutions
    #[arg(long)]
    pub max_resolutions: Option<usize>,

    /// Print the system after every pass, not just the final one
    #[arg(long)]
    pub trace: bool,

    /// Echo input prompts to stderr
    #[arg(long)]
    pub prompt: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Exact integers, unknowns tracked by sign
    Symbolic,
    /// Floating point back-substitution
    Numeric,
}

impl Cli {
    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            max_resolutions: self.max_resolutions,
            record_trace: self.trace,
        }
    }
}

fn parse_precision(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("precision must be a positive number, got {s}"))
    }
}
