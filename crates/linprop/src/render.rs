//! Text rendering of systems and solve traces.
//!
//! Layout follows a fixed-width grid: a `Matrix: (r x c)` header, one line
//! per row, known values right-aligned and unknowns printed as their
//! polarity (`++` / `--`).

use crate::engine::{Snapshot, Stage};
use crate::scalar::Scalar;
use crate::system::System;
use crate::value::Cell;
use std::fmt::Write;

/// Formatting of a single known value
pub trait CellFormat<T> {
    /// Column width for every cell
    fn width(&self) -> usize;

    /// Text for a known value, without padding
    fn format_value(&self, value: T) -> String;

    /// Right-aligned text for a cell
    fn format_cell(&self, cell: &Cell<T>) -> String
    where
        T: Copy,
    {
        let text = match cell {
            Cell::Known(v) => self.format_value(*v),
            Cell::Unknown(p) => p.to_string(),
        };
        format!("{:>width$}", text, width = self.width())
    }
}

/// Values printed as-is, four columns wide
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormat;

impl<T: Scalar> CellFormat<T> for PlainFormat {
    fn width(&self) -> usize {
        4
    }

    fn format_value(&self, value: T) -> String {
        value.to_string()
    }
}

/// Values rounded to the nearest multiple of `precision` for display.
///
/// Only the printed text is rounded; stored values keep full precision.
#[derive(Debug, Clone, Copy)]
pub struct RoundedFormat {
    pub precision: f64,
}

impl Default for RoundedFormat {
    fn default() -> Self {
        Self { precision: 0.01 }
    }
}

impl RoundedFormat {
    pub fn new(precision: f64) -> Self {
        Self { precision }
    }

    /// Nearest multiple of `precision`; non-positive precision disables
    /// rounding.
    pub fn round(&self, value: f64) -> f64 {
        if self.precision > 0.0 && self.precision.is_finite() {
            (value / self.precision).round() * self.precision
        } else {
            value
        }
    }

    /// Decimal places needed to show any multiple of `precision` exactly,
    /// taken from the shortest decimal form of `precision` itself.
    pub fn decimals(&self) -> usize {
        if !(self.precision > 0.0 && self.precision.is_finite()) {
            return 0;
        }
        self.precision
            .to_string()
            .split_once('.')
            .map_or(0, |(_, frac)| frac.len())
    }
}

impl<T: Scalar> CellFormat<T> for RoundedFormat {
    fn width(&self) -> usize {
        (self.decimals() + 6).max(4)
    }

    fn format_value(&self, value: T) -> String {
        let rounded = self.round(value.to_f64());
        // Avoid printing "-0.00"
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        format!("{:.*}", self.decimals(), rounded)
    }
}

/// Column label: `a`..`z`, then `aa`, `ab`, ...
pub fn column_label(mut col: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'a' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Render the coefficient matrix
pub fn render_matrix<T: Scalar, F: CellFormat<T>>(system: &System<T>, format: &F) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Matrix: ({} x {})", system.nrows(), system.ncols());
    for row in system.coefficients().rows() {
        for cell in row {
            out.push_str(&format.format_cell(cell));
        }
        out.push('\n');
    }
    out
}

/// Render the constant terms with a column-label header
pub fn render_constants<T: Scalar, F: CellFormat<T>>(system: &System<T>, format: &F) -> String {
    let mut out = String::new();
    let width = format.width();
    let _ = writeln!(out, "Matrix: (1 x {})", system.ncols());
    for col in 0..system.ncols() {
        let _ = write!(out, "{:>width$}", column_label(col), width = width);
    }
    out.push('\n');
    for cell in system.constants() {
        out.push_str(&format.format_cell(cell));
    }
    out.push('\n');
    out
}

/// Render the matrix followed by the constant terms
pub fn render_system<T: Scalar, F: CellFormat<T>>(system: &System<T>, format: &F) -> String {
    format!(
        "{}\n{}",
        render_matrix(system, format),
        render_constants(system, format)
    )
}

/// Heading for a trace stage
pub fn stage_title(stage: Stage) -> String {
    match stage {
        Stage::Input => "input".to_string(),
        Stage::Annotated => "annotated".to_string(),
        Stage::Resolved { row, col } => {
            format!("resolved {} from row {}", column_label(col), row + 1)
        }
        Stage::Final => "final".to_string(),
    }
}

/// Render every snapshot of a trace under its stage heading
pub fn render_trace<T: Scalar, F: CellFormat<T>>(trace: &[Snapshot<T>], format: &F) -> String {
    let mut out = String::new();
    for snapshot in trace {
        let _ = writeln!(out, "== {}", stage_title(snapshot.stage));
        out.push_str(&render_system(&snapshot.system, format));
        out.push('\n');
    }
    out
}
