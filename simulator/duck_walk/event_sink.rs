//! Event logging for simulator

use dd_rust::{Event, EventSink, StepCount, TrialId};

/// Logging event sink that outputs events to console
pub struct LoggingEventSink {
    enabled: bool,
}

impl LoggingEventSink {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl EventSink for LoggingEventSink {
    fn log(&mut self, trial: TrialId, step: StepCount, event: Event) {
        if !self.enabled {
            return;
        }

        match event {
            Event::RoundPlayed { tokens } => {
                println!("{} {}: {}", trial, step, tokens);
            }
            Event::Converged { cell, steps } => {
                println!("{} met: {} after {}", trial, cell, steps);
            }
            Event::StepCapReached { steps } => {
                println!("{} capped: {}", trial, steps);
            }
        }
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}
