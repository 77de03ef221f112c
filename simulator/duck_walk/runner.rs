//! Duck walk simulation runner

use super::config::DuckWalkConfig;
use super::event_sink::LoggingEventSink;
use super::stats::{CountResult, SimResult};
use dd_rust::{exact_expected_steps, DuckError, Estimator, EstimatorConfig, TokenSet};
use log::info;

/// Duck walk simulation runner
pub struct DuckWalkRunner {
    config: DuckWalkConfig,
    seed: [u8; 32],
}

impl DuckWalkRunner {
    /// Create a new duck walk runner
    pub fn new(config: DuckWalkConfig) -> Self {
        let seed = config.resolve_seed();
        Self { config, seed }
    }

    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }

    /// Estimate every configured duck count. Each count restarts the
    /// generator from the same seed, so a count replays alone.
    pub fn run(self) -> Result<SimResult, DuckError> {
        let mut sink = LoggingEventSink::new(self.config.verbose);
        let mut counts = Vec::with_capacity(self.config.token_counts.len());

        for &ducks in &self.config.token_counts {
            info!("estimating {} ducks from {}", ducks, self.config.start);

            let start = TokenSet::uniform(self.config.start, ducks)?;
            let estimator = Estimator::new(EstimatorConfig {
                trials: self.config.trials,
                seed: Some(self.seed),
                max_steps: self.config.max_steps,
                verbose: self.config.verbose,
            });

            let estimate = estimator.estimate_with_sink(&start, &mut sink)?;

            let exact = if self.config.compare_exact {
                let exact = exact_expected_steps(estimator.simulator().move_table(), &start);
                if exact.is_none() {
                    info!("no exact answer for {} ducks", ducks);
                }
                exact
            } else {
                None
            };

            counts.push(CountResult {
                ducks,
                estimate,
                exact,
            });
        }

        Ok(SimResult {
            seed_used: self.seed,
            start: self.config.start,
            counts,
        })
    }
}
