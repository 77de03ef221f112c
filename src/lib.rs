//! # ddRust - Delirious Ducks
//!
//! Monte Carlo estimate of how many rounds it takes for ducks doing random
//! walks on a 3x3 grid of rocks to all land on the same rock, counting at
//! least one round.
//!
//! ## Core Components
//!
//! - **MoveTable**: Legal unit moves for every cell, built once
//! - **Simulator**: Round stepper and game runner over an explicit RNG
//! - **Estimator**: Repeats games and averages their step counts
//! - **Exact solver**: Absorbing Markov chain answer for small duck counts
//!
//! ```no_run
//! use dd_rust::{Estimator, EstimatorConfig, TokenSet, CENTER};
//!
//! let estimator = Estimator::new(EstimatorConfig::default());
//! let ducks = TokenSet::uniform(CENTER, 2).unwrap();
//! let estimate = estimator.estimate(&ducks).unwrap();
//! println!("{:?}", estimate.mean);
//! ```
//!
//! ## Testing and Simulation
//!
//! Scenario files and the runner that loads them live in `simulator/`.

pub mod dd_estimator;
pub mod dd_game;
pub mod dd_grid;
pub mod dd_interface;
pub mod dd_markov;

// Re-export commonly used types
pub use dd_estimator::{expected_moves, Estimate, Estimator, EstimatorConfig, DEFAULT_TRIALS};
pub use dd_game::Simulator;
pub use dd_grid::MoveTable;
pub use dd_interface::{
    Coordinate, DuckError, Event, EventSink, Move, NoOpSink, RecordingSink, StepCount, TokenSet,
    TrialId, TrialOutcome, CENTER,
};
pub use dd_markov::exact_expected_steps;
