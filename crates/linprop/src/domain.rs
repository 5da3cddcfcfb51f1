//! Numeric-domain strategies for the propagation engine.
//!
//! The fixed-point loop in [`crate::engine`] is written once. What differs
//! between the two solving modes is how a cell contributes to its row, how
//! the system is prepared before iterating, and how a resolved pivot is
//! written back. Those three hooks make up the [`Domain`] trait.

use crate::error::{PropagationError, Result};
use crate::scalar::Scalar;
use crate::system::System;
use crate::value::{Cell, Polarity};
use num_traits::{Float, PrimInt, Signed};

/// Strategy for one solving mode.
pub trait Domain<T: Scalar> {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// One-off pass run before the resolution loop.
    fn prepare(&self, system: &mut System<T>) -> Result<()>;

    /// Contribution of column `col` to equation `row`.
    ///
    /// `Known` holds the term's value; `Unknown` means the variable is still
    /// unresolved in this row.
    fn term(&self, system: &System<T>, row: usize, col: usize) -> Result<Cell<T>>;

    /// Whether an unknown term counts as a pivot candidate. Non-candidates
    /// contribute nothing to the row sum.
    fn is_candidate(&self, _system: &System<T>, _row: usize, _col: usize) -> bool {
        true
    }

    /// Write back the resolution of the pivot at `(row, col)`, given the sum
    /// of the row's other known terms. Returns the variable's value.
    fn resolve(&self, system: &mut System<T>, row: usize, col: usize, sum: T) -> Result<T>;
}

/// Sign-propagation mode over exact integers.
///
/// Unknown coefficients are tracked as a polarity. Known constants are
/// folded into their coefficients up front so each row becomes a plain sum
/// of known terms plus `±x` for every unresolved variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Symbolic;

impl<T> Domain<T> for Symbolic
where
    T: Scalar + PrimInt + Signed,
{
    fn name(&self) -> &'static str {
        "symbolic"
    }

    /// Annotate pass: nonzero coefficients become `coeff * constant` when the
    /// constant is known and a polarity marker otherwise. Zeros stay inert.
    fn prepare(&self, system: &mut System<T>) -> Result<()> {
        for i in 0..system.nrows() {
            for j in 0..system.ncols() {
                let coeff = match system[[i, j]] {
                    Cell::Known(c) if !c.is_zero() => c,
                    _ => continue,
                };
                system[[i, j]] = match system[j] {
                    Cell::Known(v) => Cell::Known(
                        coeff
                            .try_mul(v)
                            .ok_or(PropagationError::Overflow { row: i, col: j })?,
                    ),
                    Cell::Unknown(_) => {
                        if !coeff.is_unit_magnitude() {
                            return Err(PropagationError::NonUnitCoefficient {
                                row: i,
                                col: j,
                                value: coeff.to_string(),
                            });
                        }
                        Cell::Unknown(Polarity::of(coeff))
                    }
                };
            }
        }
        Ok(())
    }

    fn term(&self, system: &System<T>, row: usize, col: usize) -> Result<Cell<T>> {
        Ok(system[[row, col]])
    }

    /// Sign reconciliation. With a `Negative` pivot the variable equals
    /// `sum`, with a `Positive` pivot it equals `-sum`. Every row still
    /// holding an unknown in the pivot column receives `±value` by its own
    /// polarity.
    fn resolve(&self, system: &mut System<T>, row: usize, col: usize, sum: T) -> Result<T> {
        let overflow = PropagationError::Overflow { row, col };
        let pivot = system[[row, col]]
            .polarity()
            .ok_or(PropagationError::NotAPivot { row, col })?;
        let value = match pivot {
            Polarity::Negative => sum,
            Polarity::Positive => sum.try_neg().ok_or(overflow.clone())?,
        };
        let negated = value.try_neg().ok_or(overflow)?;

        for r in 0..system.nrows() {
            if let Cell::Unknown(p) = system[[r, col]] {
                system[[r, col]] = Cell::Known(match p {
                    Polarity::Positive => value,
                    Polarity::Negative => negated,
                });
            }
        }
        if system[col].is_unknown() {
            system[col] = Cell::Known(value);
        }
        Ok(value)
    }
}

/// Back-substitution mode over floating point.
///
/// Coefficients are always known; only constant terms are resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct Numeric;

impl Numeric {
    fn coefficient<T: Scalar>(system: &System<T>, row: usize, col: usize) -> Result<T> {
        system[[row, col]]
            .known()
            .ok_or(PropagationError::UnknownCoefficient { row, col })
    }
}

impl<T> Domain<T> for Numeric
where
    T: Scalar + Float,
{
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn prepare(&self, system: &mut System<T>) -> Result<()> {
        for i in 0..system.nrows() {
            for j in 0..system.ncols() {
                Self::coefficient(system, i, j)?;
            }
        }
        Ok(())
    }

    fn term(&self, system: &System<T>, row: usize, col: usize) -> Result<Cell<T>> {
        let coeff = Self::coefficient(system, row, col)?;
        Ok(match system[col] {
            Cell::Known(v) if !coeff.is_zero() => Cell::Known(coeff * v),
            Cell::Known(_) => Cell::Known(T::zero()),
            Cell::Unknown(_) => Cell::Unknown(Polarity::of(coeff)),
        })
    }

    fn is_candidate(&self, system: &System<T>, row: usize, col: usize) -> bool {
        matches!(system[[row, col]], Cell::Known(c) if !c.is_zero())
    }

    /// `constant[col] = -sum / coeff`, guarded against a zero pivot and
    /// non-finite results.
    fn resolve(&self, system: &mut System<T>, row: usize, col: usize, sum: T) -> Result<T> {
        let coeff = Self::coefficient(system, row, col)?;
        if coeff.is_zero() {
            return Err(PropagationError::DivisionByZero { row, col });
        }
        let value = -sum / coeff;
        if !Scalar::is_finite(value) {
            return Err(PropagationError::NonFinite { row, col });
        }
        system[col] = Cell::Known(value);
        Ok(value)
    }
}
