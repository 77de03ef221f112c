//! Configuration for duck walk simulator

use dd_rust::{Coordinate, StepCount, CENTER, DEFAULT_TRIALS};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Configuration for duck walk simulation
#[derive(Debug, Clone)]
pub struct DuckWalkConfig {
    /// Games per duck count
    pub trials: u64,

    /// Duck counts to estimate, in order
    pub token_counts: Vec<usize>,

    /// Cell every duck starts on
    pub start: Coordinate,

    /// Random seed (None = generate random)
    pub seed: Option<[u8; 32]>,

    /// Optional cap on rounds per game
    pub max_steps: Option<StepCount>,

    /// Print every round
    pub verbose: bool,

    /// Solve the Markov chain for comparison
    pub compare_exact: bool,
}

impl Default for DuckWalkConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            token_counts: vec![2, 3],
            start: CENTER,
            seed: None,
            max_steps: None,
            verbose: false,
            compare_exact: false,
        }
    }
}

impl DuckWalkConfig {
    /// Get or generate seed
    pub fn resolve_seed(&self) -> [u8; 32] {
        self.seed.unwrap_or_else(|| {
            let mut temp_rng = StdRng::from_entropy();
            let mut seed = [0u8; 32];
            temp_rng.fill_bytes(&mut seed);
            seed
        })
    }
}
