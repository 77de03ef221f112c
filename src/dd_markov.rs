//! Exact expected meeting time by absorbing Markov chain analysis.
//!
//! The joint position of all ducks is one state of a finite chain. Only the
//! states reachable from the start are solved for; ducks alternate colours on
//! the checkerboard every round, so that set is much smaller than 9^k.

use std::collections::HashMap;

use log::debug;

use crate::dd_grid::MoveTable;
use crate::dd_interface::{Coordinate, Move, TokenSet, CENTER, GRID_CELLS};

/// Largest duck count solved exactly
pub const MAX_EXACT_TOKENS: usize = 4;

const PIVOT_EPSILON: f64 = 1e-12;

/// Joint positions packed base-9
type JointState = usize;

fn encode(cells: &[Coordinate]) -> JointState {
    cells.iter().fold(0, |acc, c| acc * GRID_CELLS + c.index())
}

fn decode(mut state: JointState, ducks: usize) -> Vec<Coordinate> {
    let mut cells = vec![CENTER; ducks];
    for slot in cells.iter_mut().rev() {
        if let Some(c) = Coordinate::from_index(state % GRID_CELLS) {
            *slot = c;
        }
        state /= GRID_CELLS;
    }
    cells
}

fn all_equal(cells: &[Coordinate]) -> bool {
    cells.windows(2).all(|w| w[0] == w[1])
}

/// Every joint successor of `cells` with its probability
fn successors(table: &MoveTable, cells: &[Coordinate]) -> Vec<(JointState, f64)> {
    let options: Vec<&[Move]> = cells.iter().map(|&c| table.legal_moves(c)).collect();
    let combos: usize = options.iter().map(|o| o.len()).product();
    let p = 1.0 / combos as f64;

    let mut merged: HashMap<JointState, f64> = HashMap::new();
    let mut digits = vec![0usize; cells.len()];
    let mut next = cells.to_vec();

    for _ in 0..combos {
        for (i, &cell) in cells.iter().enumerate() {
            let m = options[i][digits[i]];
            next[i] = cell.step(m).unwrap_or(cell);
        }
        *merged.entry(encode(&next)).or_insert(0.0) += p;

        // mixed-radix increment
        for i in (0..digits.len()).rev() {
            digits[i] += 1;
            if digits[i] < options[i].len() {
                break;
            }
            digits[i] = 0;
        }
    }

    merged.into_iter().collect()
}

/// Expected number of rounds until all ducks share a cell, counting at least
/// one round even when they start together.
///
/// Returns `None` when the ducks can never meet, when there are more than
/// `MAX_EXACT_TOKENS` of them, or when the system turns out singular.
pub fn exact_expected_steps(table: &MoveTable, start: &TokenSet) -> Option<f64> {
    let ducks = start.len();
    if ducks > MAX_EXACT_TOKENS || !start.can_converge() {
        return None;
    }
    if ducks == 1 {
        return Some(1.0);
    }

    let start_state = encode(start.positions());

    // breadth-first walk over reachable joint states
    let mut transitions: HashMap<JointState, Vec<(JointState, f64)>> = HashMap::new();
    let mut frontier = vec![start_state];
    while let Some(state) = frontier.pop() {
        if transitions.contains_key(&state) {
            continue;
        }
        let next = successors(table, &decode(state, ducks));
        for &(s, _) in &next {
            if !transitions.contains_key(&s) {
                frontier.push(s);
            }
        }
        transitions.insert(state, next);
    }

    // unknowns: reachable states where the ducks are still apart
    let mut unknowns: Vec<JointState> = transitions
        .keys()
        .copied()
        .filter(|&s| !all_equal(&decode(s, ducks)))
        .collect();
    unknowns.sort_unstable();
    let row_of: HashMap<JointState, usize> =
        unknowns.iter().enumerate().map(|(i, &s)| (s, i)).collect();

    debug!(
        "exact solve: {} ducks, {} reachable states, {} unknowns",
        ducks,
        transitions.len(),
        unknowns.len()
    );

    // h(s) - sum P(s, t) h(t) = 1 over apart states; met states have h = 0
    let n = unknowns.len();
    let mut matrix = vec![vec![0.0f64; n + 1]; n];
    for (row, state) in unknowns.iter().enumerate() {
        matrix[row][row] += 1.0;
        matrix[row][n] = 1.0;
        for &(next, p) in &transitions[state] {
            if let Some(&col) = row_of.get(&next) {
                matrix[row][col] -= p;
            }
        }
    }

    let h = solve(matrix)?;

    let expected = 1.0
        + transitions[&start_state]
            .iter()
            .map(|&(next, p)| row_of.get(&next).map_or(0.0, |&i| p * h[i]))
            .sum::<f64>();

    Some(expected)
}

/// Gaussian elimination with partial pivoting on an augmented n x (n+1) matrix
fn solve(mut a: Vec<Vec<f64>>) -> Option<Vec<f64>> {
    let n = a.len();

    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < PIVOT_EPSILON {
            return None;
        }
        a.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..=n {
                a[row][k] -= factor * a[col][k];
            }
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (a[row][n] - tail) / a[row][row];
    }

    Some(x)
}
