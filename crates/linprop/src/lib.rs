//! Fixed-point propagation solver for sparse linear systems
//!
//! Each equation is `Σ_j coeff[j] * x[j] = 0`, where some coefficients or
//! variable values are initially unknown. The solver repeatedly picks an
//! equation with exactly one unresolved term, resolves it from the others,
//! and stops when no such equation remains.
//!
//! Two solving modes share one engine:
//! - [`Symbolic`]: exact integer arithmetic, unknowns tracked as a polarity
//! - [`Numeric`]: floating-point back-substitution
//!
//! # Example
//!
//! ```
//! use linprop::{solve_symbolic, System};
//!
//! // a + b - c = 0 with a = 2, b = 5
//! let system = System::from_known(vec![vec![1, 1, -1]], vec![Some(2), Some(5), None]).unwrap();
//! let solution = solve_symbolic(system, None).unwrap();
//!
//! assert_eq!(solution.system.constant(2).unwrap().known(), Some(7));
//! ```

pub mod domain;
pub mod engine;
pub mod error;
pub mod render;
pub mod scalar;
pub mod system;
pub mod value;

// Re-export main types
pub use domain::{Domain, Numeric, Symbolic};
pub use engine::{
    solve_numeric, solve_symbolic, Propagator, Resolution, Snapshot, Solution, SolverOptions,
    Stage,
};
pub use error::{PropagationError, Result};
pub use render::{render_system, render_trace, CellFormat, PlainFormat, RoundedFormat};
pub use scalar::Scalar;
pub use system::{Matrix, Row, System};
pub use value::{Cell, Polarity};

#[doc(hidden)]
pub use paste::paste as __paste;
