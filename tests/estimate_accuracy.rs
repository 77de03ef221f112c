//! Simulated means against the exact Markov chain answers.

use dd_rust::{
    exact_expected_steps, expected_moves, Coordinate, Estimator, EstimatorConfig, MoveTable,
    Simulator, TokenSet, CENTER,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const TOLERANCE: f64 = 0.05;

fn estimate(ducks: usize, start: Coordinate, trials: u64, seed: u8) -> f64 {
    let estimator = Estimator::new(EstimatorConfig {
        trials,
        seed: Some([seed; 32]),
        ..Default::default()
    });
    let start = TokenSet::uniform(start, ducks).unwrap();
    estimator.estimate(&start).unwrap().mean.unwrap()
}

#[test]
fn test_two_ducks_match_exact_answer() {
    let table = MoveTable::new();
    let start = TokenSet::uniform(CENTER, 2).unwrap();
    let exact = exact_expected_steps(&table, &start).unwrap();

    let simulated = estimate(2, CENTER, 100_000, 7);

    println!("exact={:.4} simulated={:.4}", exact, simulated);
    assert!(simulated.is_finite() && simulated > 0.0);
    assert!(
        (simulated - exact).abs() < TOLERANCE,
        "simulated {} too far from exact {}",
        simulated,
        exact
    );
}

#[test]
fn test_two_ducks_from_corner() {
    let corner = Coordinate::new(0, 0).unwrap();
    let table = MoveTable::new();
    let exact = exact_expected_steps(&table, &TokenSet::uniform(corner, 2).unwrap()).unwrap();
    assert!((exact - 129.0 / 37.0).abs() < 1e-9);

    let simulated = estimate(2, corner, 100_000, 11);
    assert!((simulated - exact).abs() < TOLERANCE);
}

#[test]
fn test_three_ducks_take_longer_than_two() {
    let two = estimate(2, CENTER, 50_000, 3);
    let three = estimate(3, CENTER, 50_000, 3);
    assert!(three >= two, "three ducks {} vs two ducks {}", three, two);

    let table = MoveTable::new();
    let exact_three = exact_expected_steps(&table, &TokenSet::uniform(CENTER, 3).unwrap()).unwrap();
    // three-duck games have a much wider spread
    assert!((three - exact_three).abs() < 0.5, "three ducks {} vs {}", three, exact_three);
}

#[test]
fn test_plain_contract_with_injected_rng() {
    let sim = Simulator::new();
    let start = TokenSet::uniform(CENTER, 2).unwrap();

    let mut a = StdRng::seed_from_u64(2024);
    let mut b = StdRng::seed_from_u64(2024);
    let first = expected_moves(&sim, &start, 20_000, &mut a).unwrap();
    let second = expected_moves(&sim, &start, 20_000, &mut b).unwrap();

    assert_eq!(first, second);
    assert!((first - 363.0 / 74.0).abs() < 0.15);
}
