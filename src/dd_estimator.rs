//! Monte Carlo estimate of the expected meeting time.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::dd_game::Simulator;
use crate::dd_interface::{DuckError, EventSink, NoOpSink, StepCount, TokenSet, TrialOutcome};

/// Default number of games per estimate
pub const DEFAULT_TRIALS: u64 = 1_000_000;

/// Configuration for one estimate
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Number of independent games to play
    pub trials: u64,

    /// Random seed (None = generate random)
    pub seed: Option<[u8; 32]>,

    /// Optional cap on rounds per game
    pub max_steps: Option<StepCount>,

    /// Report every round to the event sink
    pub verbose: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            max_steps: None,
            verbose: false,
        }
    }
}

impl EstimatorConfig {
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

/// Result of an estimate
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// Seed the generator was built from, if the estimator built it
    pub seed_used: Option<[u8; 32]>,

    /// Games played
    pub trials: u64,

    /// Games where the ducks met
    pub converged: u64,

    /// Games stopped by the step cap
    pub exhausted: u64,

    /// Rounds summed over converged games
    pub total_steps: u64,

    /// Shortest and longest converged game
    pub min_steps: Option<StepCount>,
    pub max_steps: Option<StepCount>,

    /// Mean rounds over converged games
    pub mean: Option<f64>,
}

impl Estimate {
    fn empty(trials: u64) -> Self {
        Self {
            seed_used: None,
            trials,
            converged: 0,
            exhausted: 0,
            total_steps: 0,
            min_steps: None,
            max_steps: None,
            mean: None,
        }
    }

    fn record(&mut self, outcome: TrialOutcome) {
        match outcome {
            TrialOutcome::Converged(steps) => {
                self.converged += 1;
                self.total_steps += steps;
                self.min_steps = Some(self.min_steps.map_or(steps, |m| m.min(steps)));
                self.max_steps = Some(self.max_steps.map_or(steps, |m| m.max(steps)));
            }
            TrialOutcome::Exhausted(_) => self.exhausted += 1,
        }
    }

    fn finish(&mut self) {
        self.mean = if self.converged > 0 {
            Some(self.total_steps as f64 / self.converged as f64)
        } else {
            None
        };
    }

    /// Print a summary of the estimate
    pub fn print_summary(&self) {
        if let Some(seed) = self.seed_used {
            println!("  Seed: {:?}", seed);
        }
        println!("  Trials: {}", self.trials);
        println!("  Converged: {}", self.converged);
        if self.exhausted > 0 {
            println!("  Hit step cap: {}", self.exhausted);
        }
        if let (Some(min), Some(max)) = (self.min_steps, self.max_steps) {
            println!("  Steps: min={}, max={}", min, max);
        }
        match self.mean {
            Some(mean) => println!("  Mean steps: {:.3}", mean),
            None => println!("  Mean steps: n/a"),
        }
    }
}

/// Repeats full games from one starting position and averages the step counts
pub struct Estimator {
    simulator: Simulator,
    config: EstimatorConfig,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            simulator: Simulator::new(),
            config,
        }
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Run the configured number of games from `start` with a freshly seeded
    /// generator
    pub fn estimate(&self, start: &TokenSet) -> Result<Estimate, DuckError> {
        self.estimate_with_sink(start, &mut NoOpSink)
    }

    pub fn estimate_with_sink<S: EventSink + ?Sized>(
        &self,
        start: &TokenSet,
        sink: &mut S,
    ) -> Result<Estimate, DuckError> {
        let seed = self.config.resolve_seed();
        let mut rng = StdRng::from_seed(seed);
        let mut estimate = self.estimate_with_rng(start, &mut rng, sink)?;
        estimate.seed_used = Some(seed);
        Ok(estimate)
    }

    /// Run the games drawing from a caller-supplied generator.
    ///
    /// # Returns
    /// * `Err(ZeroTrials)` - no games configured
    /// * `Err(NeverConverges)` - ducks on different colours and no step cap
    pub fn estimate_with_rng<R, S>(
        &self,
        start: &TokenSet,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<Estimate, DuckError>
    where
        R: Rng + ?Sized,
        S: EventSink + ?Sized,
    {
        let trials = self.config.trials;
        if trials == 0 {
            return Err(DuckError::ZeroTrials);
        }
        if self.config.max_steps.is_none() && !start.can_converge() {
            return Err(DuckError::NeverConverges);
        }

        debug!(
            "estimating {} ducks from {}: trials={}, max_steps={:?}",
            start.len(),
            start,
            trials,
            self.config.max_steps
        );

        let progress_every = (trials / 10).max(1);
        let mut estimate = Estimate::empty(trials);
        let mut quiet = NoOpSink;

        for trial in 0..trials {
            let outcome = if self.config.verbose {
                self.simulator
                    .play_game_with(start, rng, self.config.max_steps, trial, sink)
            } else {
                self.simulator
                    .play_game_with(start, rng, self.config.max_steps, trial, &mut quiet)
            };
            estimate.record(outcome);

            if (trial + 1) % progress_every == 0 {
                debug!("trial {}/{}", trial + 1, trials);
            }
        }

        estimate.finish();

        info!(
            "{} ducks: mean={:?} over {} converged trials ({} capped)",
            start.len(),
            estimate.mean,
            estimate.converged,
            estimate.exhausted
        );

        Ok(estimate)
    }
}

/// Plain contract: mean rounds to meet over `trials` uncapped games drawn
/// from `rng`
pub fn expected_moves<R: Rng + ?Sized>(
    simulator: &Simulator,
    start: &TokenSet,
    trials: u64,
    rng: &mut R,
) -> Result<f64, DuckError> {
    if trials == 0 {
        return Err(DuckError::ZeroTrials);
    }
    if !start.can_converge() {
        return Err(DuckError::NeverConverges);
    }

    let total: u64 = (0..trials).map(|_| simulator.play_game(start, rng)).sum();
    Ok(total as f64 / trials as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dd_interface::{Coordinate, Event, RecordingSink, CENTER};

    fn config(trials: u64) -> EstimatorConfig {
        EstimatorConfig {
            trials,
            seed: Some([42u8; 32]),
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_trials_rejected() {
        let estimator = Estimator::new(config(0));
        let start = TokenSet::uniform(CENTER, 2).unwrap();
        assert_eq!(estimator.estimate(&start), Err(DuckError::ZeroTrials));

        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            expected_moves(estimator.simulator(), &start, 0, &mut rng),
            Err(DuckError::ZeroTrials)
        );
    }

    #[test]
    fn test_unreachable_meeting_rejected_without_cap() {
        let start = TokenSet::new(vec![CENTER, Coordinate::new(1, 0).unwrap()]).unwrap();
        let estimator = Estimator::new(config(10));
        assert_eq!(estimator.estimate(&start), Err(DuckError::NeverConverges));

        // with a cap every game simply runs out
        let capped = Estimator::new(EstimatorConfig {
            max_steps: Some(20),
            ..config(10)
        });
        let estimate = capped.estimate(&start).unwrap();
        assert_eq!(estimate.exhausted, 10);
        assert_eq!(estimate.converged, 0);
        assert_eq!(estimate.mean, None);
    }

    #[test]
    fn test_fixed_seed_reproduces_estimate() {
        let start = TokenSet::uniform(CENTER, 3).unwrap();
        let a = Estimator::new(config(2_000)).estimate(&start).unwrap();
        let b = Estimator::new(config(2_000)).estimate(&start).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.seed_used, Some([42u8; 32]));
    }

    #[test]
    fn test_generated_seed_is_recorded() {
        let estimator = Estimator::new(EstimatorConfig {
            trials: 10,
            ..Default::default()
        });
        let start = TokenSet::uniform(CENTER, 2).unwrap();
        let first = estimator.estimate(&start).unwrap();
        let seed = first.seed_used.unwrap();

        let replay = Estimator::new(EstimatorConfig {
            seed: Some(seed),
            ..estimator.config().clone()
        })
        .estimate(&start)
        .unwrap();

        assert_eq!(first, replay);
    }

    #[test]
    fn test_estimate_counts_are_consistent() {
        let start = TokenSet::uniform(CENTER, 2).unwrap();
        let estimate = Estimator::new(config(5_000)).estimate(&start).unwrap();

        assert_eq!(estimate.converged + estimate.exhausted, 5_000);
        assert_eq!(estimate.exhausted, 0);
        let mean = estimate.mean.unwrap();
        assert!(mean.is_finite() && mean >= 1.0);
        assert!(estimate.min_steps.unwrap() >= 1);
        assert!(estimate.max_steps.unwrap() >= estimate.min_steps.unwrap());
        assert!((mean - estimate.total_steps as f64 / 5_000.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_duck_mean_is_one() {
        let start = TokenSet::uniform(CENTER, 1).unwrap();
        let estimate = Estimator::new(config(100)).estimate(&start).unwrap();
        assert_eq!(estimate.mean, Some(1.0));

        let mut rng = StdRng::seed_from_u64(42);
        let sim = Simulator::new();
        assert_eq!(expected_moves(&sim, &start, 100, &mut rng), Ok(1.0));
    }

    #[test]
    fn test_verbose_forwards_rounds_to_sink() {
        let start = TokenSet::uniform(CENTER, 2).unwrap();
        let mut sink = RecordingSink::default();
        let estimator = Estimator::new(EstimatorConfig {
            verbose: true,
            ..config(5)
        });
        let estimate = estimator.estimate_with_sink(&start, &mut sink).unwrap();

        let rounds = sink
            .events
            .iter()
            .filter(|(_, _, e)| matches!(e, Event::RoundPlayed { .. }))
            .count() as u64;
        assert_eq!(rounds, estimate.total_steps);

        let mut quiet_sink = RecordingSink::default();
        Estimator::new(config(5))
            .estimate_with_sink(&start, &mut quiet_sink)
            .unwrap();
        assert!(quiet_sink.events.is_empty());
    }

    #[test]
    fn test_expected_moves_matches_estimator_on_same_stream() {
        let start = TokenSet::uniform(CENTER, 2).unwrap();
        let estimator = Estimator::new(config(1_000));

        let mut a = StdRng::seed_from_u64(99);
        let plain = expected_moves(estimator.simulator(), &start, 1_000, &mut a).unwrap();

        let mut b = StdRng::seed_from_u64(99);
        let full = estimator
            .estimate_with_rng(&start, &mut b, &mut NoOpSink)
            .unwrap();

        assert_eq!(Some(plain), full.mean);
    }
}
