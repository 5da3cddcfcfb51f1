//! Error types for linprop

use thiserror::Error;

/// Errors that can occur while building or propagating a system
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropagationError {
    /// A coefficient row disagrees with the constant-terms row in length
    #[error("Shape mismatch: coefficient row {row} has {actual} cells, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Index out of bounds
    #[error("Index out of bounds: ({row}, {col}) is out of bounds for a ({nrows}, {ncols}) system")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    /// The cell is not the sole unresolved candidate in its row
    #[error("({row}, {col}) is not a single-unknown pivot")]
    NotAPivot { row: usize, col: usize },

    /// Numeric mode requires every coefficient to be known
    #[error("Coefficient at ({row}, {col}) is unknown; numeric mode needs known coefficients")]
    UnknownCoefficient { row: usize, col: usize },

    /// Resolution attempted with a zero pivot coefficient
    #[error("Division by zero: pivot coefficient at ({row}, {col}) is zero")]
    DivisionByZero { row: usize, col: usize },

    /// Resolution produced NaN or an infinity
    #[error("Non-finite value produced while resolving pivot ({row}, {col})")]
    NonFinite { row: usize, col: usize },

    /// Exact integer arithmetic overflowed
    #[error("Arithmetic overflow while processing ({row}, {col})")]
    Overflow { row: usize, col: usize },

    /// Sign reconciliation only holds for coefficients of magnitude one
    #[error("Coefficient {value} at ({row}, {col}) multiplies an unknown and is not +1 or -1")]
    NonUnitCoefficient {
        row: usize,
        col: usize,
        value: String,
    },

    /// The resolution loop hit its cap before reaching a fixed point
    #[error("No fixed point reached within {limit} resolutions")]
    NonTermination { limit: usize },
}

/// Result type for propagation operations
pub type Result<T> = std::result::Result<T, PropagationError>;
