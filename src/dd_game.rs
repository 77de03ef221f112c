//! Round stepper and game runner.
//!
//! Randomness is always passed in explicitly, so a seeded generator replays
//! the exact same walk.

use log::trace;
use rand::Rng;

use crate::dd_grid::MoveTable;
use crate::dd_interface::{
    Coordinate, Event, EventSink, NoOpSink, StepCount, TokenSet, TrialId, TrialOutcome,
};

/// Owns the move table and plays rounds and games on it
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    table: MoveTable,
}

impl Simulator {
    pub fn new() -> Self {
        Self {
            table: MoveTable::new(),
        }
    }

    pub fn move_table(&self) -> &MoveTable {
        &self.table
    }

    /// Move one duck by a uniformly chosen legal move from its current cell
    fn move_duck<R: Rng + ?Sized>(&self, cell: Coordinate, rng: &mut R) -> Coordinate {
        let moves = self.table.legal_moves(cell);
        let m = moves[rng.gen_range(0..moves.len())];
        // table only lists moves that stay on the grid
        cell.step(m).unwrap_or(cell)
    }

    /// Every duck makes one independent random legal move.
    ///
    /// Ducks never block each other; any number may share a cell.
    pub fn play_round<R: Rng + ?Sized>(&self, tokens: &TokenSet, rng: &mut R) -> TokenSet {
        let moved = tokens
            .positions()
            .iter()
            .map(|&cell| self.move_duck(cell, rng))
            .collect();
        TokenSet::from_stepped(moved)
    }

    /// Same as `play_round`, reporting the new positions to `sink`
    pub fn play_round_with_sink<R, S>(
        &self,
        tokens: &TokenSet,
        rng: &mut R,
        trial: TrialId,
        step: StepCount,
        sink: &mut S,
    ) -> TokenSet
    where
        R: Rng + ?Sized,
        S: EventSink + ?Sized,
    {
        let next = self.play_round(tokens, rng);
        if sink.enabled() {
            sink.log(
                trial,
                step,
                Event::RoundPlayed {
                    tokens: next.clone(),
                },
            );
        }
        next
    }

    /// Play rounds until every duck is on the same cell, after at least one
    /// round. Returns the number of rounds played.
    pub fn play_game<R: Rng + ?Sized>(&self, start: &TokenSet, rng: &mut R) -> StepCount {
        self.play_game_with(start, rng, None, 0, &mut NoOpSink)
            .steps()
    }

    /// Full game runner.
    ///
    /// # Arguments
    /// * `max_steps` - Optional cap; values below 1 are treated as 1
    /// * `trial` - Trial id reported with events
    /// * `sink` - Receives one `RoundPlayed` per round and the final event
    ///
    /// # Returns
    /// * `Converged(n)` - ducks met after `n` rounds
    /// * `Exhausted(n)` - cap of `n` rounds reached first
    pub fn play_game_with<R, S>(
        &self,
        start: &TokenSet,
        rng: &mut R,
        max_steps: Option<StepCount>,
        trial: TrialId,
        sink: &mut S,
    ) -> TrialOutcome
    where
        R: Rng + ?Sized,
        S: EventSink + ?Sized,
    {
        let cap = max_steps.map(|m| m.max(1));

        let mut steps: StepCount = 1;
        let mut tokens = self.play_round_with_sink(start, rng, trial, steps, sink);

        while !tokens.converged() {
            if cap.map_or(false, |cap| steps >= cap) {
                trace!("trial {} hit step cap at {}", trial, steps);
                if sink.enabled() {
                    sink.log(trial, steps, Event::StepCapReached { steps });
                }
                return TrialOutcome::Exhausted(steps);
            }
            steps += 1;
            tokens = self.play_round_with_sink(&tokens, rng, trial, steps, sink);
        }

        if sink.enabled() {
            if let Some(cell) = tokens.meeting_cell() {
                sink.log(trial, steps, Event::Converged { cell, steps });
            }
        }

        TrialOutcome::Converged(steps)
    }
}
