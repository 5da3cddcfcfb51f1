//! End-to-end tests for the sign-propagation mode.

mod common;

use common::{sample_network, SAMPLE_VALUES};
use linprop::{
    solve_symbolic, Cell, Propagator, PropagationError, SolverOptions, Stage, Symbolic, System,
};

#[test]
fn test_sample_network_resolves_every_unknown() {
    let input = sample_network();
    let solution = solve_symbolic(input.clone(), None).unwrap();

    assert!(solution.is_complete());
    let values: Vec<i64> = solution
        .system
        .constants()
        .iter()
        .map(|c| c.known().unwrap())
        .collect();
    assert_eq!(values, SAMPLE_VALUES);

    // Every original equation holds exactly.
    assert_eq!(solution.system.residuals(&input), Some(vec![0, 0, 0, 0]));
}

#[test]
fn test_sample_network_resolution_order() {
    let solution = solve_symbolic(sample_network(), None).unwrap();
    let order: Vec<(usize, usize, i64)> = solution
        .resolutions
        .iter()
        .map(|r| (r.row, r.col, r.value))
        .collect();

    // Each resolution makes the next row eligible; the scan restarts from
    // the top every time.
    assert_eq!(order, vec![(0, 2, 3), (1, 8, 2), (2, 6, 1), (3, 7, 11)]);
}

#[test]
fn test_sample_network_rows_fully_known() {
    let solution = solve_symbolic(sample_network(), None).unwrap();
    for row in solution.system.coefficients().rows() {
        assert!(row.iter().all(Cell::is_known));
        // Folded rows sum to zero once every term is known.
        let sum: i64 = row.iter().map(|c| c.known().unwrap()).sum();
        assert_eq!(sum, 0);
    }
}

#[test]
fn test_fixed_point_is_idempotent() {
    let mut prop =
        Propagator::new(sample_network(), Symbolic, SolverOptions::default()).unwrap();
    while prop.step().unwrap().is_some() {}

    let at_fixed_point = prop.system().clone();
    assert_eq!(prop.step().unwrap(), None);
    assert_eq!(prop.find_eligible().unwrap(), None);
    assert_eq!(prop.system(), &at_fixed_point);
}

#[test]
fn test_pivot_sum_matches_known_cells() {
    let solution = solve_symbolic(sample_network(), None).unwrap();

    // The snapshot preceding each resolution holds the row it was computed
    // from.
    for (before, after) in solution.trace.iter().zip(solution.trace.iter().skip(1)) {
        let Stage::Resolved { row, col } = after.stage else {
            continue;
        };
        let resolution = solution
            .resolutions
            .iter()
            .find(|r| r.row == row && r.col == col)
            .unwrap();

        let cells = before.system.coefficients().row(row);
        assert_eq!(cells.iter().filter(|c| c.is_unknown()).count(), 1);
        let expected: i64 = cells
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != col)
            .map(|(_, c)| c.known().unwrap())
            .sum();
        assert_eq!(resolution.sum, expected);
    }
}

#[test]
fn test_scan_restarts_from_top() {
    // Row 0 has two unknowns; row 1 pins d to 0 and leaves row 0 stuck.
    let system = System::from_known(
        vec![vec![1, 1, -1, 0], vec![0, 0, 0, 1]],
        vec![Some(4), None, None, None],
    )
    .unwrap();
    let solution = solve_symbolic(system, None).unwrap();
    assert_eq!(solution.resolutions.len(), 1);
    assert_eq!(solution.resolutions[0].col, 3);
    assert_eq!(solution.system.constants()[3], Cell::Known(0));
    assert!(!solution.is_complete());

    let system = System::from_known(
        vec![vec![1, -1, 0], vec![0, 1, -1]],
        vec![None, None, Some(6)],
    )
    .unwrap();
    let solution = solve_symbolic(system, None).unwrap();
    let cols: Vec<usize> = solution.resolutions.iter().map(|r| r.col).collect();
    // Row 1 (b - 6 = 0) resolves b, then row 0 becomes eligible for a.
    assert_eq!(cols, vec![1, 0]);
    assert_eq!(solution.system.constants()[0], Cell::Known(6));
}

#[test]
fn test_shape_mismatch() {
    let err = System::from_known(vec![vec![1, 1], vec![1]], vec![None, Some(1)]).unwrap_err();
    assert_eq!(
        err,
        PropagationError::ShapeMismatch {
            row: 1,
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn test_non_unit_unknown_coefficient_is_rejected() {
    let system = System::from_known(vec![vec![3, -1]], vec![None, Some(6)]).unwrap();
    assert!(matches!(
        solve_symbolic(system, None),
        Err(PropagationError::NonUnitCoefficient { row: 0, col: 0, .. })
    ));
}

#[test]
fn test_non_unit_known_coefficient_is_folded() {
    // 3 * 2 - b = 0
    let system = System::from_known(vec![vec![3, -1]], vec![Some(2), None]).unwrap();
    let solution = solve_symbolic(system, None).unwrap();
    assert_eq!(solution.system.constants()[1], Cell::Known(6));
}

#[test]
fn test_wide_integers() {
    let system = System::from_known(
        vec![vec![1i128, -1]],
        vec![Some(i64::MAX as i128 * 4), None],
    )
    .unwrap();
    let solution = solve_symbolic(system, None).unwrap();
    assert_eq!(
        solution.system.constants()[1],
        Cell::Known(i64::MAX as i128 * 4)
    );
}

#[test]
fn test_overflow_is_reported() {
    let system = System::from_known(
        vec![vec![1i32, 1, -1]],
        vec![Some(i32::MAX), Some(1), None],
    )
    .unwrap();
    assert!(matches!(
        solve_symbolic(system, None),
        Err(PropagationError::Overflow { row: 0, .. })
    ));
}
