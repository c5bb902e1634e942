use arrayvec::ArrayVec;
use rand::Rng as _;
use serde::Serialize;

use crate::{
    ActivePiece, Axis, Board, Error, GameStats, GridPos, Input, MAX_SHAPE_CELLS, PieceSeed,
    PieceSource, SPAWN_HEIGHT, Variant,
};

/// Whether the game accepts play input.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[display("running")]
    Running,
    #[display("over")]
    Over,
}

/// Result of a move, rotation, drop or tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The active piece took the new position.
    Moved,
    /// Nothing changed.
    Rejected,
    /// The active piece was written into the board and a new one spawned.
    Committed { cleared_layers: usize },
}

/// The whole mutable state of one game.
///
/// `GameState` owns the board, the active piece, the statistics and the
/// status. Renderers only borrow it.
///
/// All play goes through [`Self::apply`] and [`Self::tick`]; they enforce the
/// `Running`/`Over` state machine. A piece that cannot descend further is
/// committed: its footprint is written into the board, full layers are
/// cleared, the score is updated and a new piece spawns. The game is over
/// once a piece settles with its anchor at [`SPAWN_HEIGHT`] or above, or
/// when a new piece does not fit.
///
/// # Example
///
/// ```
/// use cubetris_engine::{GameState, Input, PieceSeed, Status, Variant};
///
/// let mut game = GameState::with_seed(Variant::TOP, PieceSeed::from_u128(3));
/// game.apply(Input::MoveForward).unwrap();
/// game.apply(Input::Rotate).unwrap();
///
/// while game.status().is_running() {
///     game.apply(Input::HardDrop).unwrap();
/// }
/// assert!(game.apply(Input::Rotate).is_err());
///
/// game.apply(Input::Reset).unwrap();
/// assert_eq!(game.status(), Status::Running);
/// assert_eq!(game.score(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    variant: Variant,
    board: Board,
    active_piece: ActivePiece,
    piece_source: PieceSource,
    stats: GameStats,
    status: Status,
}

impl GameState {
    /// Starts a game with a random seed.
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self::with_seed(variant, rand::rng().random())
    }

    /// Like [`Self::new`], but with a seed for a reproducible piece sequence.
    #[must_use]
    pub fn with_seed(variant: Variant, seed: PieceSeed) -> Self {
        let mut piece_source = PieceSource::with_seed(variant.catalog, seed);
        let active_piece = ActivePiece::new(piece_source.next_kind());
        log::info!(
            "new {} game with seed {seed}, first piece {:?}",
            variant.kind,
            active_piece.kind()
        );
        Self {
            variant,
            board: Board::new(),
            active_piece,
            piece_source,
            stats: GameStats::new(),
            status: Status::Running,
        }
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        &self.active_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.piece_source.seed()
    }

    /// Where the active piece would land on a hard drop.
    #[must_use]
    pub fn ghost_piece(&self) -> ActivePiece {
        self.active_piece.settled(&self.board)
    }

    /// Applies one player input.
    ///
    /// While the game is over only [`Input::Reset`] is accepted, and while it
    /// is running every input except [`Input::Reset`] is. Other combinations
    /// return [`Error::InvalidTransition`] and change nothing. An accepted
    /// reset reports [`MoveOutcome::Moved`].
    pub fn apply(&mut self, input: Input) -> Result<MoveOutcome, Error> {
        match (self.status, input) {
            (Status::Over, Input::Reset) => {
                self.restart();
                Ok(MoveOutcome::Moved)
            }
            (Status::Over, _) | (Status::Running, Input::Reset) => Err(self.invalid(input)),
            (Status::Running, Input::Rotate) => self.rotate(),
            (Status::Running, Input::HardDrop) => self.hard_drop(),
            (Status::Running, _) => {
                let (d1, d2) = input.movement().ok_or_else(|| self.invalid(input))?;
                self.try_move(d1, d2)
            }
        }
    }

    /// Advances the drop timer by one step.
    ///
    /// The active piece descends one layer; if it cannot, it is committed.
    /// Does nothing once the game is over.
    pub fn tick(&mut self) -> MoveOutcome {
        if self.status.is_over() {
            return MoveOutcome::Rejected;
        }
        if let Some(outcome) = self.shift(0, -1, 0) {
            return outcome;
        }
        self.commit()
    }

    /// Moves the active piece by `d1` along x and `d2` along the variant's
    /// second axis.
    ///
    /// The move is all or nothing. A blocked downward move commits the piece
    /// when the variant says so; any other blocked move is rejected. Upward
    /// moves are always rejected.
    ///
    /// Returns [`Error::InvalidTransition`] once the game is over, reported
    /// as the move input pointing the same way as the delta.
    pub fn try_move(&mut self, d1: i32, d2: i32) -> Result<MoveOutcome, Error> {
        if self.status.is_over() {
            return Err(self.invalid(move_input(d1, d2)));
        }
        let axes = self.variant.axes;
        let (dx, dy, dz) = axes.delta(d1, d2);
        if dy > 0 {
            log::trace!("rejected upward move");
            return Ok(MoveOutcome::Rejected);
        }
        if let Some(outcome) = self.shift(dx, dy, dz) {
            return Ok(outcome);
        }
        if dy < 0 && axes.second_axis == Axis::Y && axes.blocked_descent_commits {
            return Ok(self.commit());
        }
        log::trace!("rejected move ({dx}, {dy}, {dz})");
        Ok(MoveOutcome::Rejected)
    }

    /// Turns the active piece a quarter turn in place.
    ///
    /// Rejected when the turned footprint does not fit. Never changes the
    /// anchor or the board.
    pub fn rotate(&mut self) -> Result<MoveOutcome, Error> {
        if self.status.is_over() {
            return Err(self.invalid(Input::Rotate));
        }
        let rotated = self.active_piece.rotated();
        if !rotated.fits(&self.board) {
            log::trace!("rejected rotation of {:?}", rotated.kind());
            return Ok(MoveOutcome::Rejected);
        }
        self.active_piece = rotated;
        Ok(MoveOutcome::Moved)
    }

    /// Drops the active piece as far as it goes and commits it.
    pub fn hard_drop(&mut self) -> Result<MoveOutcome, Error> {
        if self.status.is_over() {
            return Err(self.invalid(Input::HardDrop));
        }
        self.active_piece = self.ghost_piece();
        Ok(self.commit())
    }

    /// Starts a fresh game after a game over.
    ///
    /// Score and board are cleared and a new piece spawns. The piece source
    /// keeps its sequence, so the new game continues it rather than
    /// repeating the previous one.
    pub fn reset(&mut self) -> Result<(), Error> {
        if self.status.is_running() {
            return Err(self.invalid(Input::Reset));
        }
        self.restart();
        Ok(())
    }

    fn restart(&mut self) {
        self.board = Board::new();
        self.stats = GameStats::new();
        self.status = Status::Running;
        self.spawn();
        log::info!("game reset");
    }

    fn invalid(&self, input: Input) -> Error {
        log::trace!("ignored {input} while {}", self.status);
        Error::InvalidTransition {
            status: self.status,
            input,
        }
    }

    /// Moves the active piece if the target position fits.
    fn shift(&mut self, dx: i32, dy: i32, dz: i32) -> Option<MoveOutcome> {
        let moved = self.active_piece.moved(dx, dy, dz);
        if !moved.fits(&self.board) {
            return None;
        }
        self.active_piece = moved;
        Some(MoveOutcome::Moved)
    }

    fn commit(&mut self) -> MoveOutcome {
        let cells: ArrayVec<GridPos, MAX_SHAPE_CELLS> = self.active_piece.cells().collect();
        if let Err(err) = self.board.fill_cells(&cells) {
            // The active piece always fits, so this only happens if a game
            // over left an overlapping spawn behind.
            log::error!("cannot commit {:?}: {err}", self.active_piece.kind());
            self.status = Status::Over;
            return MoveOutcome::Rejected;
        }
        let cleared_layers = self.board.clear_full_layers();
        self.stats.complete_piece_drop(cleared_layers);

        let anchor = self.active_piece.anchor();
        log::debug!(
            "committed {:?} at ({}, {}, {}), cleared {cleared_layers} layers, score {}",
            self.active_piece.kind(),
            anchor.x,
            anchor.y,
            anchor.z,
            self.stats.score()
        );
        if anchor.y >= SPAWN_HEIGHT {
            self.status = Status::Over;
        }

        self.spawn();
        if self.status.is_over() {
            log::info!("game over with score {}", self.stats.score());
        }
        MoveOutcome::Committed { cleared_layers }
    }

    fn spawn(&mut self) {
        self.active_piece = ActivePiece::new(self.piece_source.next_kind());
        log::debug!("spawned {:?}", self.active_piece.kind());
        if !self.active_piece.fits(&self.board) {
            self.status = Status::Over;
        }
    }
}

/// The movement input whose direction matches `(d1, d2)`, x first.
fn move_input(d1: i32, d2: i32) -> Input {
    match (d1.signum(), d2.signum()) {
        (-1, _) => Input::MoveLeft,
        (1, _) => Input::MoveRight,
        (_, 1) => Input::MoveForward,
        _ => Input::MoveBackward,
    }
}
