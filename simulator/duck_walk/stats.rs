//! Statistics and results for duck walk simulator

use dd_rust::{Coordinate, Estimate};

/// Estimate for one duck count
#[derive(Debug, Clone)]
pub struct CountResult {
    pub ducks: usize,
    pub estimate: Estimate,

    /// Markov chain answer, when requested and solvable
    pub exact: Option<f64>,
}

impl CountResult {
    /// Simulated mean minus the exact answer
    pub fn error(&self) -> Option<f64> {
        match (self.estimate.mean, self.exact) {
            (Some(mean), Some(exact)) => Some(mean - exact),
            _ => None,
        }
    }
}

/// Simulation result
#[derive(Debug, Clone)]
pub struct SimResult {
    /// Seed used for the simulation
    pub seed_used: [u8; 32],

    /// Starting cell shared by every duck
    pub start: Coordinate,

    /// One entry per configured duck count
    pub counts: Vec<CountResult>,
}

impl SimResult {
    /// Print a summary of the simulation results
    pub fn print_summary(&self) {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("║        Delirious Ducks Results                         ║");
        println!("╚════════════════════════════════════════════════════════╝\n");

        println!("Configuration:");
        println!("  Seed: {:?}", self.seed_used);
        println!("  Start: {}\n", self.start);

        for row in &self.counts {
            println!("{} ducks:", row.ducks);
            row.estimate.print_summary();
            if let Some(exact) = row.exact {
                println!("  Exact: {:.3}", exact);
            }
            if let Some(error) = row.error() {
                println!("  Error: {:+.4}", error);
            }
            println!();
        }

        for row in &self.counts {
            match row.estimate.mean {
                Some(mean) => println!(
                    "Expected number of moves with {} ducks = {:.3}",
                    row.ducks, mean
                ),
                None => println!(
                    "Expected number of moves with {} ducks = n/a (every game hit the step cap)",
                    row.ducks
                ),
            }
        }
    }
}
