//! Line-oriented input for the solver.
//!
//! Coefficient rows come first, one equation per line, terminated by a line
//! holding just `0`. The next line lists the constant terms, with `-` marking
//! an unknown.

use linprop::{PropagationError, Scalar, System};
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

/// Marker for an unknown constant term
pub const UNKNOWN_TOKEN: &str = "-";

/// Line that ends the coefficient rows
pub const SENTINEL: &str = "0";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input")]
    Io(#[from] std::io::Error),

    #[error("input ended before the {0}")]
    UnexpectedEof(&'static str),

    #[error("line {line}: {token:?} is not a number")]
    InvalidNumber { line: usize, token: String },

    #[error("no coefficient rows before the terminating 0")]
    EmptySystem,

    #[error(transparent)]
    Shape(#[from] PropagationError),
}

/// Supplier of input lines
pub trait LineSource {
    /// Next line without its terminator, `None` at end of input
    fn next_line(&mut self) -> Result<Option<String>, InputError>;
}

/// Lines from any iterator, e.g. an in-memory fixture
pub struct IterSource<I>(pub I);

impl<I, S> LineSource for IterSource<I>
where
    I: Iterator<Item = S>,
    S: Into<String>,
{
    fn next_line(&mut self) -> Result<Option<String>, InputError> {
        Ok(self.0.next().map(Into::into))
    }
}

/// Lines from a buffered reader such as stdin or a file
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, InputError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Reads a system from `source`, optionally echoing prompts to `prompt`.
pub fn read_system<T, S>(
    source: &mut S,
    mut prompt: Option<&mut dyn Write>,
) -> Result<System<T>, InputError>
where
    T: Scalar + FromStr,
    S: LineSource + ?Sized,
{
    let mut line_no = 0;
    let mut rows: Vec<Vec<T>> = Vec::new();

    loop {
        if let Some(w) = prompt.as_deref_mut() {
            writeln!(w, "Coefficients for row {} or {SENTINEL}:", rows.len() + 1)?;
        }
        let line = next_content_line(source, &mut line_no)?
            .ok_or(InputError::UnexpectedEof("terminating 0 row"))?;
        if line.trim() == SENTINEL {
            break;
        }
        let row = line
            .split_whitespace()
            .map(|token| parse_number(token, line_no))
            .collect::<Result<Vec<T>, _>>()?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(InputError::EmptySystem);
    }

    if let Some(w) = prompt.as_deref_mut() {
        writeln!(w, "Constant terms, {UNKNOWN_TOKEN} if unknown:")?;
    }
    let line = next_content_line(source, &mut line_no)?
        .ok_or(InputError::UnexpectedEof("constant terms"))?;
    let constants = line
        .split_whitespace()
        .map(|token| match token {
            UNKNOWN_TOKEN => Ok(None),
            _ => parse_number(token, line_no).map(Some),
        })
        .collect::<Result<Vec<Option<T>>, _>>()?;

    tracing::debug!(
        rows = rows.len(),
        cols = constants.len(),
        "read system from input"
    );
    Ok(System::from_known(rows, constants)?)
}

/// Skips blank lines and keeps `line_no` current.
fn next_content_line<S: LineSource + ?Sized>(
    source: &mut S,
    line_no: &mut usize,
) -> Result<Option<String>, InputError> {
    while let Some(line) = source.next_line()? {
        *line_no += 1;
        if !line.trim().is_empty() {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

fn parse_number<T: FromStr>(token: &str, line: usize) -> Result<T, InputError> {
    token.parse().map_err(|_| InputError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use linprop::Cell;

    fn lines(text: &'static str) -> IterSource<std::str::Lines<'static>> {
        IterSource(text.lines())
    }

    #[test]
    fn test_read_integer_system() {
        let mut src = lines("1 1 -1\n0 1 1\n0\n10 - 3\n");
        let system: System<i64> = read_system(&mut src, None).unwrap();

        assert_eq!(system.nrows(), 2);
        assert_eq!(system.ncols(), 3);
        assert_eq!(system.coefficient(0, 2).unwrap(), Cell::Known(-1));
        assert_eq!(system.constant(1).unwrap(), Cell::unknown());
        assert_eq!(system.constant(2).unwrap(), Cell::Known(3));
    }

    #[test]
    fn test_read_float_system_with_blank_lines() {
        let mut src = lines("\n0.5 -1.25\n\n0\n- 2.5\n");
        let system: System<f64> = read_system(&mut src, None).unwrap();
        assert_eq!(system.coefficient(0, 1).unwrap(), Cell::Known(-1.25));
        assert_eq!(system.unknown_constants(), vec![0]);
    }

    #[test]
    fn test_reader_source() {
        let data = "1 -1\r\n0\r\n4 -\r\n";
        let mut src = ReaderSource::new(data.as_bytes());
        let system: System<i64> = read_system(&mut src, None).unwrap();
        assert_eq!(system.constant(0).unwrap(), Cell::Known(4));
    }

    #[test]
    fn test_prompts() {
        let mut src = lines("1 1\n0\n- 2\n");
        let mut prompts = Vec::new();
        let _: System<i64> = read_system(&mut src, Some(&mut prompts)).unwrap();

        let text = String::from_utf8(prompts).unwrap();
        assert_eq!(
            text,
            "Coefficients for row 1 or 0:\nCoefficients for row 2 or 0:\nConstant terms, - if unknown:\n"
        );
    }

    #[test]
    fn test_invalid_number() {
        let mut src = lines("1 x\n0\n1 1\n");
        let err = read_system::<i64, _>(&mut src, None).unwrap_err();
        assert!(matches!(err, InputError::InvalidNumber { line: 1, ref token } if token == "x"));
    }

    #[test]
    fn test_missing_sentinel() {
        let mut src = lines("1 1\n");
        let err = read_system::<i64, _>(&mut src, None).unwrap_err();
        assert!(matches!(err, InputError::UnexpectedEof(_)));
    }

    #[test]
    fn test_missing_constants() {
        let mut src = lines("1 1\n0\n");
        let err = read_system::<i64, _>(&mut src, None).unwrap_err();
        assert!(matches!(err, InputError::UnexpectedEof("constant terms")));
    }

    #[test]
    fn test_empty_system() {
        let mut src = lines("0\n1\n");
        let err = read_system::<i64, _>(&mut src, None).unwrap_err();
        assert!(matches!(err, InputError::EmptySystem));
    }

    #[test]
    fn test_shape_mismatch() {
        let mut src = lines("1 1 1\n0\n1 -\n");
        let err = read_system::<i64, _>(&mut src, None).unwrap_err();
        assert!(matches!(
            err,
            InputError::Shape(PropagationError::ShapeMismatch { row: 0, .. })
        ));
    }
}
