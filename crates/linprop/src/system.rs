//! System container: a coefficient matrix plus one constant term per column.

use crate::error::{PropagationError, Result};
use crate::scalar::Scalar;
use crate::value::Cell;
use std::ops::{Index, IndexMut};

/// One equation's coefficients, or the constant-terms vector
pub type Row<T> = Vec<Cell<T>>;

/// Simple 2D matrix of cells backed by Vec (row-major)
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<Cell<T>>,
    nrows: usize,
    ncols: usize,
}

impl<T> Matrix<T> {
    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Borrow row `i`
    pub fn row(&self, i: usize) -> &[Cell<T>] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[Cell<T>]> + '_ {
        (0..self.nrows).map(move |i| self.row(i))
    }
}

impl<T> Index<[usize; 2]> for Matrix<T> {
    type Output = Cell<T>;

    fn index(&self, idx: [usize; 2]) -> &Self::Output {
        &self.data[idx[0] * self.ncols + idx[1]]
    }
}

impl<T> IndexMut<[usize; 2]> for Matrix<T> {
    fn index_mut(&mut self, idx: [usize; 2]) -> &mut Self::Output {
        &mut self.data[idx[0] * self.ncols + idx[1]]
    }
}

/// A sparse linear system with possibly unknown coefficients and constants.
///
/// Column `j` of every coefficient row refers to the same variable as
/// constant term `j`. Each row encodes `Σ_j coeff[j] * constant[j] = 0`;
/// a zero coefficient means the variable is absent from that equation.
#[derive(Debug, Clone, PartialEq)]
pub struct System<T> {
    coefficients: Matrix<T>,
    constants: Row<T>,
}

impl<T: Scalar> System<T> {
    /// Build a system, checking that every coefficient row has as many cells
    /// as there are constant terms.
    pub fn new(coefficients: Vec<Row<T>>, constants: Row<T>) -> Result<Self> {
        let ncols = constants.len();
        let nrows = coefficients.len();
        let mut data = Vec::with_capacity(nrows * ncols);
        for (row, cells) in coefficients.into_iter().enumerate() {
            if cells.len() != ncols {
                return Err(PropagationError::ShapeMismatch {
                    row,
                    expected: ncols,
                    actual: cells.len(),
                });
            }
            data.extend(cells);
        }

        Ok(Self {
            coefficients: Matrix { data, nrows, ncols },
            constants,
        })
    }

    /// Build a system from fully known coefficients; `None` constants are
    /// unknown.
    pub fn from_known(coefficients: Vec<Vec<T>>, constants: Vec<Option<T>>) -> Result<Self> {
        let rows = coefficients
            .into_iter()
            .map(|r| r.into_iter().map(Cell::Known).collect())
            .collect();
        let constants = constants.into_iter().map(Cell::from_option).collect();
        Self::new(rows, constants)
    }

    /// Number of equations
    pub fn nrows(&self) -> usize {
        self.coefficients.nrows()
    }

    /// Number of variables
    pub fn ncols(&self) -> usize {
        self.constants.len()
    }

    pub fn coefficients(&self) -> &Matrix<T> {
        &self.coefficients
    }

    pub fn constants(&self) -> &[Cell<T>] {
        &self.constants
    }

    /// Coefficient cell at `(row, col)`
    pub fn coefficient(&self, row: usize, col: usize) -> Result<Cell<T>> {
        self.check_bounds(row, col)?;
        Ok(self.coefficients[[row, col]])
    }

    /// Constant term for column `col`
    pub fn constant(&self, col: usize) -> Result<Cell<T>> {
        self.check_column(col)?;
        Ok(self.constants[col])
    }

    pub fn set_coefficient(&mut self, row: usize, col: usize, cell: Cell<T>) -> Result<()> {
        self.check_bounds(row, col)?;
        self.coefficients[[row, col]] = cell;
        Ok(())
    }

    pub fn set_constant(&mut self, col: usize, cell: Cell<T>) -> Result<()> {
        self.check_column(col)?;
        self.constants[col] = cell;
        Ok(())
    }

    /// Column indices whose constant term is still unknown
    pub fn unknown_constants(&self) -> Vec<usize> {
        self.constants
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_unknown())
            .map(|(j, _)| j)
            .collect()
    }

    /// Number of unknown cells across coefficients and constants
    pub fn unknown_count(&self) -> usize {
        self.coefficients
            .data
            .iter()
            .chain(self.constants.iter())
            .filter(|c| c.is_unknown())
            .count()
    }

    /// True when no constant term is unknown
    pub fn is_fully_resolved(&self) -> bool {
        self.constants.iter().all(Cell::is_known)
    }

    /// Evaluate `Σ_j coeff[j] * constant[j]` per row, taking coefficients
    /// from `original` and constants from `self`.
    ///
    /// Returns `None` if the shapes differ, any cell involved is unknown, or
    /// the arithmetic overflows. A solved system has all residuals zero.
    pub fn residuals(&self, original: &System<T>) -> Option<Vec<T>> {
        if original.nrows() != self.nrows() || original.ncols() != self.ncols() {
            return None;
        }
        let values: Vec<T> = self
            .constants
            .iter()
            .map(Cell::known)
            .collect::<Option<_>>()?;

        original
            .coefficients
            .rows()
            .map(|row| {
                row.iter().zip(&values).try_fold(T::zero(), |acc, (c, &v)| {
                    let coeff = c.known()?;
                    acc.try_add(coeff.try_mul(v)?)
                })
            })
            .collect()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.nrows() || col >= self.ncols() {
            return Err(self.out_of_bounds(row, col));
        }
        Ok(())
    }

    /// Constant terms exist even when the system has no equations.
    fn check_column(&self, col: usize) -> Result<()> {
        if col >= self.ncols() {
            return Err(self.out_of_bounds(0, col));
        }
        Ok(())
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> PropagationError {
        PropagationError::IndexOutOfBounds {
            row,
            col,
            nrows: self.nrows(),
            ncols: self.ncols(),
        }
    }
}

impl<T> Index<[usize; 2]> for System<T> {
    type Output = Cell<T>;

    fn index(&self, idx: [usize; 2]) -> &Self::Output {
        &self.coefficients[idx]
    }
}

impl<T> IndexMut<[usize; 2]> for System<T> {
    fn index_mut(&mut self, idx: [usize; 2]) -> &mut Self::Output {
        &mut self.coefficients[idx]
    }
}

impl<T> Index<usize> for System<T> {
    type Output = Cell<T>;

    fn index(&self, col: usize) -> &Self::Output {
        &self.constants[col]
    }
}

impl<T> IndexMut<usize> for System<T> {
    fn index_mut(&mut self, col: usize) -> &mut Self::Output {
        &mut self.constants[col]
    }
}
