//! Fixed-point propagation engine
//!
//! Repeatedly finds the first equation with exactly one unresolved term,
//! resolves that term from the others, and restarts the scan from the top,
//! until a full scan finds nothing to resolve.

use crate::domain::{Domain, Numeric, Symbolic};
use crate::error::{PropagationError, Result};
use crate::scalar::Scalar;
use crate::system::System;
use crate::value::Cell;
use num_traits::{Float, PrimInt, Signed};

/// Options for the propagation loop
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Maximum number of resolutions before giving up with
    /// [`PropagationError::NonTermination`]. `None` uses the number of
    /// unknown cells after preparation, since every resolution clears at
    /// least one of them.
    pub max_resolutions: Option<usize>,
    /// Keep a snapshot of the system after every pass
    pub record_trace: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_resolutions: None,
            record_trace: true,
        }
    }
}

/// Point in the solve at which a snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The system as supplied
    Input,
    /// After the domain's preparation pass
    Annotated,
    /// After resolving the pivot at `(row, col)`
    Resolved { row: usize, col: usize },
    /// At the fixed point
    Final,
}

/// Copy of the working system at one stage
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub stage: Stage,
    pub system: System<T>,
}

/// One resolution step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<T> {
    /// Equation the pivot was found in
    pub row: usize,
    /// Pivot column
    pub col: usize,
    /// Sum of the row's known terms excluding the pivot column
    pub sum: T,
    /// Resolved value of the variable
    pub value: T,
}

/// Result of running the engine to its fixed point
#[derive(Debug, Clone)]
pub struct Solution<T> {
    /// Final system; may still contain unknowns
    pub system: System<T>,
    /// Resolutions in the order they were made
    pub resolutions: Vec<Resolution<T>>,
    /// Snapshots, empty unless [`SolverOptions::record_trace`] is set
    pub trace: Vec<Snapshot<T>>,
}

impl<T: Scalar> Solution<T> {
    /// True when every constant term has been resolved
    pub fn is_complete(&self) -> bool {
        self.system.is_fully_resolved()
    }
}

/// Propagation engine owning the working copy of a system
#[derive(Debug)]
pub struct Propagator<T: Scalar, D: Domain<T>> {
    system: System<T>,
    domain: D,
    limit: usize,
    record_trace: bool,
    resolutions: Vec<Resolution<T>>,
    trace: Vec<Snapshot<T>>,
}

impl<T: Scalar, D: Domain<T>> Propagator<T, D> {
    /// Take ownership of `system` and run the domain's preparation pass.
    pub fn new(system: System<T>, domain: D, options: SolverOptions) -> Result<Self> {
        let mut prop = Self {
            system,
            domain,
            limit: 0,
            record_trace: options.record_trace,
            resolutions: Vec::new(),
            trace: Vec::new(),
        };
        prop.record(Stage::Input);
        prop.domain.prepare(&mut prop.system)?;
        prop.record(Stage::Annotated);

        prop.limit = options
            .max_resolutions
            .unwrap_or_else(|| prop.system.unknown_count());
        tracing::debug!(
            domain = prop.domain.name(),
            nrows = prop.system.nrows(),
            ncols = prop.system.ncols(),
            limit = prop.limit,
            "prepared system"
        );
        Ok(prop)
    }

    /// Current working system
    pub fn system(&self) -> &System<T> {
        &self.system
    }

    pub fn domain(&self) -> &D {
        &self.domain
    }

    /// Resolutions made so far
    pub fn resolutions(&self) -> &[Resolution<T>] {
        &self.resolutions
    }

    /// Resolution cap in effect
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Count pivot candidates in `row` and return the last one's column.
    fn scan_row(&self, row: usize) -> Result<(usize, Option<usize>)> {
        let mut count = 0;
        let mut last = None;
        for col in 0..self.system.ncols() {
            if self.is_candidate(row, col)? {
                count += 1;
                last = Some(col);
            }
        }
        Ok((count, last))
    }

    fn is_candidate(&self, row: usize, col: usize) -> Result<bool> {
        Ok(match self.domain.term(&self.system, row, col)? {
            Cell::Known(_) => false,
            Cell::Unknown(_) => self.domain.is_candidate(&self.system, row, col),
        })
    }

    /// First row, from the top, with exactly one pivot candidate.
    pub fn find_eligible(&self) -> Result<Option<(usize, usize)>> {
        for row in 0..self.system.nrows() {
            if let (1, Some(col)) = self.scan_row(row)? {
                tracing::trace!(row, col, "eligible row");
                return Ok(Some((row, col)));
            }
        }
        Ok(None)
    }

    /// Sum of the known terms in `row`, excluding column `col`.
    pub fn pivot_sum(&self, row: usize, col: usize) -> Result<T> {
        let mut sum = T::zero();
        for j in (0..self.system.ncols()).filter(|&j| j != col) {
            if let Cell::Known(v) = self.domain.term(&self.system, row, j)? {
                sum = sum
                    .try_add(v)
                    .ok_or(PropagationError::Overflow { row, col: j })?;
            }
        }
        Ok(sum)
    }

    /// Resolve the unknown at `(row, col)` from the rest of its row.
    ///
    /// The cell must be unresolved and every other term in the row must be
    /// known or inert, otherwise [`PropagationError::NotAPivot`] is
    /// returned.
    pub fn resolve_pivot(&mut self, row: usize, col: usize) -> Result<Resolution<T>> {
        self.system.coefficient(row, col)?;
        if self.domain.term(&self.system, row, col)?.is_known() {
            return Err(PropagationError::NotAPivot { row, col });
        }
        for j in (0..self.system.ncols()).filter(|&j| j != col) {
            if self.is_candidate(row, j)? {
                return Err(PropagationError::NotAPivot { row, col });
            }
        }

        let sum = self.pivot_sum(row, col)?;
        let value = self.domain.resolve(&mut self.system, row, col, sum)?;
        tracing::debug!(row, col, sum = %sum, value = %value, "resolved pivot");

        let resolution = Resolution {
            row,
            col,
            sum,
            value,
        };
        self.resolutions.push(resolution);
        self.record(Stage::Resolved { row, col });
        Ok(resolution)
    }

    /// One scan and at most one resolution; `None` at the fixed point.
    pub fn step(&mut self) -> Result<Option<Resolution<T>>> {
        let Some((row, col)) = self.find_eligible()? else {
            return Ok(None);
        };
        if self.resolutions.len() >= self.limit {
            return Err(PropagationError::NonTermination { limit: self.limit });
        }
        self.resolve_pivot(row, col).map(Some)
    }

    /// Run until no row is eligible.
    pub fn run(mut self) -> Result<Solution<T>> {
        while self.step()?.is_some() {}

        let remaining = self.system.unknown_constants().len();
        tracing::info!(
            domain = self.domain.name(),
            resolutions = self.resolutions.len(),
            remaining,
            "reached fixed point"
        );
        if remaining > 0 {
            tracing::warn!(remaining, "system stabilised with unresolved constants");
        }

        self.record(Stage::Final);
        Ok(Solution {
            system: self.system,
            resolutions: self.resolutions,
            trace: self.trace,
        })
    }

    fn record(&mut self, stage: Stage) {
        if self.record_trace {
            self.trace.push(Snapshot {
                stage,
                system: self.system.clone(),
            });
        }
    }
}

/// Solve in sign-propagation mode with exact integer arithmetic
pub fn solve_symbolic<T>(system: System<T>, options: Option<SolverOptions>) -> Result<Solution<T>>
where
    T: Scalar + PrimInt + Signed,
{
    Propagator::new(system, Symbolic, options.unwrap_or_default())?.run()
}

/// Solve in back-substitution mode with floating point arithmetic
pub fn solve_numeric<T>(system: System<T>, options: Option<SolverOptions>) -> Result<Solution<T>>
where
    T: Scalar + Float,
{
    Propagator::new(system, Numeric, options.unwrap_or_default())?.run()
}
