//! Shared fixtures for integration tests.

#![allow(dead_code)]

use linprop::System;

/// Four equations over ten variables `a`..`j`, four of them unknown.
pub fn sample_network() -> System<i64> {
    System::from_known(
        vec![
            vec![1, 1, -1, 0, 0, 0, 0, 0, 0, -1],
            vec![0, 0, 1, -1, -1, 0, 0, 0, 1, 0],
            vec![0, 0, 0, 0, 1, -1, 1, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, -1, -1, -1, 1],
        ],
        vec![
            Some(10),
            Some(7),
            None,
            Some(3),
            Some(2),
            Some(3),
            None,
            None,
            None,
            Some(14),
        ],
    )
    .unwrap()
}

/// Values the sample network resolves to, by column.
pub const SAMPLE_VALUES: [i64; 10] = [10, 7, 3, 3, 2, 3, 1, 11, 2, 14];

/// A lower-triangular floating-point chain:
/// `2a + 0.5t = 0`, `a + 3b - u = 0`, `0.1c - b = 0` with `t = 3`, `u = 1`.
pub fn numeric_chain() -> System<f64> {
    System::from_known(
        vec![
            vec![2.0, 0.0, 0.0, 0.5, 0.0],
            vec![1.0, 3.0, 0.0, 0.0, -1.0],
            vec![0.0, -1.0, 0.1, 0.0, 0.0],
        ],
        vec![None, None, None, Some(3.0), Some(1.0)],
    )
    .unwrap()
}
