//! Duck walk with fixed seed for reproducibility
//!
//! Run with: cargo run --example fixed_seed_walk

use log::info;
use simple_logger::SimpleLogger;

mod duck_walk;
use duck_walk::{DuckWalkConfig, DuckWalkRunner};

fn main() {
    SimpleLogger::new().init().unwrap();

    // Use a fixed seed for reproducible results
    let fixed_seed = [42u8; 32];

    info!("Running duck walk with fixed seed: {:?}", fixed_seed);

    let config = DuckWalkConfig {
        trials: 20_000,
        seed: Some(fixed_seed),
        compare_exact: true,
        ..Default::default()
    };

    let first = DuckWalkRunner::new(config.clone());
    assert_eq!(first.seed(), fixed_seed, "Seed mismatch!");
    let first = first.run().unwrap();

    let second = DuckWalkRunner::new(config).run().unwrap();

    first.print_summary();

    for (a, b) in first.counts.iter().zip(&second.counts) {
        assert_eq!(a.estimate, b.estimate, "{} ducks did not replay", a.ducks);
    }
    info!("✓ Replay verification passed!");

    // Show a single short game round by round
    let verbose = DuckWalkConfig {
        trials: 1,
        token_counts: vec![2],
        seed: Some(fixed_seed),
        verbose: true,
        ..Default::default()
    };
    DuckWalkRunner::new(verbose).run().unwrap();
}
