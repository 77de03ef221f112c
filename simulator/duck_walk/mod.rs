//! Duck walk simulator module
//!
//! Runs the estimator for a list of duck counts from one starting cell and
//! optionally sets each estimate beside the exact Markov chain answer.

pub mod config;
pub mod event_sink;
pub mod runner;
pub mod stats;

pub use config::DuckWalkConfig;
pub use event_sink::LoggingEventSink;
pub use runner::DuckWalkRunner;
pub use stats::{CountResult, SimResult};
