//! Cell values: either a known number or an unknown marker with a polarity.

use std::fmt;

/// Sign an unresolved variable contributes to its row.
///
/// Derived once from the sign of the original coefficient and held fixed
/// until the cell is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Polarity of a coefficient: zero and above is `Positive`.
    pub fn of<T: PartialOrd + num_traits::Zero>(value: T) -> Self {
        if value < T::zero() {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }

    /// The opposite polarity.
    pub fn flip(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }

    pub fn is_negative(self) -> bool {
        self == Polarity::Negative
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => f.write_str("++"),
            Polarity::Negative => f.write_str("--"),
        }
    }
}

/// A matrix or constant-term entry.
///
/// Unknown constant terms always carry `Positive`; only coefficient cells
/// give the polarity a meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<T> {
    Known(T),
    Unknown(Polarity),
}

impl<T> Cell<T> {
    /// An unknown marker as produced by input parsing.
    pub fn unknown() -> Self {
        Cell::Unknown(Polarity::Positive)
    }

    /// `Some` becomes `Known`, `None` becomes an unknown marker.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Cell::Known(v),
            None => Cell::unknown(),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Cell::Known(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Cell::Unknown(_))
    }

    /// Polarity of an unknown cell, `None` for known cells.
    pub fn polarity(&self) -> Option<Polarity> {
        match self {
            Cell::Known(_) => None,
            Cell::Unknown(p) => Some(*p),
        }
    }
}

impl<T: Copy> Cell<T> {
    /// Value of a known cell, `None` for unknown cells.
    pub fn known(&self) -> Option<T> {
        match self {
            Cell::Known(v) => Some(*v),
            Cell::Unknown(_) => None,
        }
    }
}

impl<T> From<T> for Cell<T> {
    fn from(value: T) -> Self {
        Cell::Known(value)
    }
}

impl<T: fmt::Display> fmt::Display for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Known(v) => fmt::Display::fmt(v, f),
            Cell::Unknown(p) => fmt::Display::fmt(p, f),
        }
    }
}
