use std::fmt;

// ============================================================================
// Grid Constants
// ============================================================================

/// Lowest coordinate on either axis
pub const GRID_MIN: i8 = 0;
/// Highest coordinate on either axis
pub const GRID_MAX: i8 = 2;
/// Cells per axis
pub const GRID_SIDE: usize = (GRID_MAX - GRID_MIN + 1) as usize;
/// Total number of cells on the grid
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;
/// A token never has more than four axis-aligned neighbours
pub const MAX_MOVES: usize = 4;

/// Number of rounds played in one trial (always >= 1)
pub type StepCount = u64;
/// Index of a trial inside an estimate
pub type TrialId = u64;

// ============================================================================
// Coordinate / Move
// ============================================================================

/// A cell on the 3x3 grid. Only constructible inside the grid bounds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    x: i8,
    y: i8,
}

/// The grid centre, where every duck starts
pub const CENTER: Coordinate = Coordinate { x: 1, y: 1 };

impl Coordinate {
    pub fn new(x: i8, y: i8) -> Result<Self, DuckError> {
        if Self::in_bounds(x, y) {
            Ok(Self { x, y })
        } else {
            Err(DuckError::OutOfBounds { x, y })
        }
    }

    pub fn in_bounds(x: i8, y: i8) -> bool {
        (GRID_MIN..=GRID_MAX).contains(&x) && (GRID_MIN..=GRID_MAX).contains(&y)
    }

    pub fn x(self) -> i8 {
        self.x
    }

    pub fn y(self) -> i8 {
        self.y
    }

    /// Row-major index into per-cell tables
    pub fn index(self) -> usize {
        (self.x - GRID_MIN) as usize * GRID_SIDE + (self.y - GRID_MIN) as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= GRID_CELLS {
            return None;
        }
        Some(Self {
            x: (index / GRID_SIDE) as i8 + GRID_MIN,
            y: (index % GRID_SIDE) as i8 + GRID_MIN,
        })
    }

    /// Every cell of the grid in index order
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..GRID_CELLS).filter_map(Coordinate::from_index)
    }

    /// Colour of the cell on the checkerboard. Every move flips it, so ducks
    /// on different colours can never share a cell.
    pub fn parity(self) -> u8 {
        ((self.x + self.y) & 1) as u8
    }

    /// Apply a move, or `None` if it would leave the grid
    pub fn step(self, m: Move) -> Option<Coordinate> {
        Coordinate::new(self.x + m.dx, self.y + m.dy).ok()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A unit axis-aligned move (dx, dy)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Move {
    pub dx: i8,
    pub dy: i8,
}

impl Move {
    pub const LEFT: Move = Move { dx: -1, dy: 0 };
    pub const RIGHT: Move = Move { dx: 1, dy: 0 };
    pub const DOWN: Move = Move { dx: 0, dy: -1 };
    pub const UP: Move = Move { dx: 0, dy: 1 };

    /// Candidate moves in the order legal moves are listed per cell
    pub const ALL: [Move; MAX_MOVES] = [Move::LEFT, Move::RIGHT, Move::DOWN, Move::UP];
}

// ============================================================================
// TokenSet
// ============================================================================

/// Positions of every duck during a trial. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    positions: Vec<Coordinate>,
}

impl TokenSet {
    pub fn new(positions: Vec<Coordinate>) -> Result<Self, DuckError> {
        if positions.is_empty() {
            return Err(DuckError::EmptyTokenSet);
        }
        Ok(Self { positions })
    }

    /// `count` ducks all sitting on `start`
    pub fn uniform(start: Coordinate, count: usize) -> Result<Self, DuckError> {
        Self::new(vec![start; count])
    }

    pub fn positions(&self) -> &[Coordinate] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when all ducks share one cell. Vacuously true for a single duck.
    pub fn converged(&self) -> bool {
        let (first, rest) = match self.positions.split_first() {
            Some(split) => split,
            None => return true,
        };
        rest.iter().all(|c| c == first)
    }

    /// Whether the ducks can ever meet: they must all stand on one colour
    pub fn can_converge(&self) -> bool {
        match self.positions.split_first() {
            Some((first, rest)) => rest.iter().all(|c| c.parity() == first.parity()),
            None => true,
        }
    }

    /// The shared cell once converged
    pub fn meeting_cell(&self) -> Option<Coordinate> {
        if self.converged() {
            self.positions.first().copied()
        } else {
            None
        }
    }

    // only the round stepper builds sets without re-validating
    pub(crate) fn from_stepped(positions: Vec<Coordinate>) -> Self {
        debug_assert!(!positions.is_empty());
        Self { positions }
    }
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.positions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "]")
    }
}

// ============================================================================
// Trial Outcome
// ============================================================================

/// How a single trial ended
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    /// All ducks met after this many rounds
    Converged(StepCount),

    /// Step cap hit before the ducks met
    Exhausted(StepCount),
}

impl TrialOutcome {
    pub fn steps(&self) -> StepCount {
        match *self {
            TrialOutcome::Converged(steps) | TrialOutcome::Exhausted(steps) => steps,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, TrialOutcome::Converged(_))
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuckError {
    /// A token set needs at least one duck
    EmptyTokenSet,

    /// Coordinate outside the grid
    OutOfBounds { x: i8, y: i8 },

    /// An estimate needs at least one trial
    ZeroTrials,

    /// Ducks on different checkerboard colours with no step cap would walk forever
    NeverConverges,
}

impl fmt::Display for DuckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuckError::EmptyTokenSet => write!(f, "token set must contain at least one duck"),
            DuckError::OutOfBounds { x, y } => write!(
                f,
                "coordinate ({}, {}) outside grid [{}, {}]",
                x, y, GRID_MIN, GRID_MAX
            ),
            DuckError::ZeroTrials => write!(f, "trial count must be positive"),
            DuckError::NeverConverges => {
                write!(f, "ducks on different cell colours never meet; set a step cap")
            }
        }
    }
}

impl std::error::Error for DuckError {}

// ============================================================================
// Event Logging System
// ============================================================================

/// Events emitted while a trial runs, for verbose output and analysis
#[derive(Debug, Clone)]
pub enum Event {
    /// Every duck moved once
    RoundPlayed { tokens: TokenSet },

    /// All ducks on one cell
    Converged { cell: Coordinate, steps: StepCount },

    /// Trial abandoned at the step cap
    StepCapReached { steps: StepCount },
}

/// Receives events from the round stepper and game runner
pub trait EventSink {
    fn log(&mut self, trial: TrialId, step: StepCount, event: Event);

    /// Skip building events nobody will read
    fn enabled(&self) -> bool {
        true
    }
}

/// No-op event sink for plain estimates
pub struct NoOpSink;

impl EventSink for NoOpSink {
    #[inline(always)]
    fn log(&mut self, _trial: TrialId, _step: StepCount, _event: Event) {}

    #[inline(always)]
    fn enabled(&self) -> bool {
        false
    }
}

/// Keeps every event in memory, mostly for tests and post-run analysis
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<(TrialId, StepCount, Event)>,
}

impl EventSink for RecordingSink {
    fn log(&mut self, trial: TrialId, step: StepCount, event: Event) {
        self.events.push((trial, step, event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(0, 0).is_ok());
        assert!(Coordinate::new(2, 2).is_ok());
        assert_eq!(
            Coordinate::new(3, 1),
            Err(DuckError::OutOfBounds { x: 3, y: 1 })
        );
        assert_eq!(
            Coordinate::new(1, -1),
            Err(DuckError::OutOfBounds { x: 1, y: -1 })
        );
    }

    #[test]
    fn test_index_round_trip_covers_grid() {
        let cells: Vec<Coordinate> = Coordinate::all().collect();
        assert_eq!(cells.len(), GRID_CELLS);
        for (i, c) in cells.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        assert_eq!(CENTER.index(), 4);
        assert!(Coordinate::from_index(GRID_CELLS).is_none());
    }

    #[test]
    fn test_step_rejects_leaving_grid() {
        let corner = Coordinate::new(0, 0).unwrap();
        assert_eq!(corner.step(Move::LEFT), None);
        assert_eq!(corner.step(Move::DOWN), None);
        assert_eq!(corner.step(Move::UP), Some(Coordinate::new(0, 1).unwrap()));
    }

    #[test]
    fn test_empty_token_set_rejected() {
        assert_eq!(TokenSet::new(vec![]), Err(DuckError::EmptyTokenSet));
        assert_eq!(TokenSet::uniform(CENTER, 0), Err(DuckError::EmptyTokenSet));
    }

    #[test]
    fn test_converged() {
        let single = TokenSet::uniform(CENTER, 1).unwrap();
        assert!(single.converged());
        assert_eq!(single.meeting_cell(), Some(CENTER));

        let apart = TokenSet::new(vec![CENTER, Coordinate::new(0, 1).unwrap()]).unwrap();
        assert!(!apart.converged());
        assert_eq!(apart.meeting_cell(), None);

        let together = TokenSet::uniform(CENTER, 3).unwrap();
        assert!(together.converged());
    }

    #[test]
    fn test_can_converge_follows_parity() {
        let corner = Coordinate::new(0, 0).unwrap();
        let edge = Coordinate::new(0, 1).unwrap();
        let far = Coordinate::new(2, 2).unwrap();

        assert!(TokenSet::new(vec![CENTER, corner, far]).unwrap().can_converge());
        assert!(!TokenSet::new(vec![CENTER, edge]).unwrap().can_converge());
        assert!(TokenSet::uniform(edge, 1).unwrap().can_converge());
    }

    #[test]
    fn test_display() {
        let set = TokenSet::new(vec![CENTER, Coordinate::new(0, 2).unwrap()]).unwrap();
        assert_eq!(set.to_string(), "[(1, 1), (0, 2)]");
    }
}
