use std::time::Duration;

use crate::{Error, GameState, Input, MoveOutcome, PieceSeed, Variant};

/// Default time between two automatic drops.
pub const DEFAULT_DROP_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SessionState {
    #[display("playing")]
    Playing,
    #[display("paused")]
    Paused,
    #[display("game over")]
    GameOver,
}

/// A game driven by a fixed frame rate.
///
/// The frontend calls [`Self::increment_frame`] once per frame. Every
/// `drop_interval` worth of frames the active piece is ticked down. Frames
/// only count while playing, so [`Self::duration`] is the time actually spent
/// in play.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use cubetris_engine::{GameSession, PieceSeed, Variant};
///
/// let mut session = GameSession::with_seed(
///     60,
///     Variant::SIDE,
///     Duration::from_millis(500),
///     PieceSeed::from_u128(1),
/// );
/// let start = session.game_state().active_piece().anchor().y;
/// for _ in 0..30 {
///     session.increment_frame();
/// }
/// assert_eq!(session.game_state().active_piece().anchor().y, start - 1);
/// assert_eq!(session.duration(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    game_state: GameState,
    session_state: SessionState,
    fps: u64,
    total_frames: u64,
    drop_interval_frames: u64,
    drop_frames: u64,
}

fn interval_frames(interval: Duration, fps: u64) -> u64 {
    let millis = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
    (millis.saturating_mul(fps) / 1000).max(1)
}

impl GameSession {
    #[must_use]
    pub fn new(fps: u64, variant: Variant, drop_interval: Duration) -> Self {
        Self::from_game_state(fps, GameState::new(variant), drop_interval)
    }

    #[must_use]
    pub fn with_seed(fps: u64, variant: Variant, drop_interval: Duration, seed: PieceSeed) -> Self {
        Self::from_game_state(fps, GameState::with_seed(variant, seed), drop_interval)
    }

    fn from_game_state(fps: u64, game_state: GameState, drop_interval: Duration) -> Self {
        let fps = fps.max(1);
        let drop_interval_frames = interval_frames(drop_interval, fps);
        Self {
            game_state,
            session_state: SessionState::Playing,
            fps,
            total_frames: 0,
            drop_interval_frames,
            drop_frames: drop_interval_frames,
        }
    }

    #[must_use]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn fps(&self) -> u64 {
        self.fps
    }

    /// Time spent playing since the current game started.
    #[must_use]
    pub fn duration(&self) -> Duration {
        const NANOS_PER_SEC: u64 = 1_000_000_000;
        let secs = self.total_frames / self.fps;
        let nanos = (self.total_frames % self.fps) * NANOS_PER_SEC / self.fps;
        // `nanos` is below one second, so it always fits.
        Duration::new(secs, u32::try_from(nanos).unwrap_or(0))
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
        log::debug!("session {}", self.session_state);
    }

    /// Advances one frame, ticking the game when a drop is due.
    ///
    /// Returns the tick outcome on frames where a drop happened.
    pub fn increment_frame(&mut self) -> Option<MoveOutcome> {
        if !self.session_state.is_playing() {
            return None;
        }
        self.total_frames += 1;
        self.drop_frames = self.drop_frames.saturating_sub(1);
        if self.drop_frames > 0 {
            return None;
        }
        self.drop_frames = self.drop_interval_frames;
        let outcome = self.game_state.tick();
        self.sync_state();
        Some(outcome)
    }

    /// Forwards a player input to the game.
    ///
    /// Inputs are ignored while paused. A reset after game over also restarts
    /// the drop timer and the elapsed time.
    pub fn handle_input(&mut self, input: Input) -> Result<MoveOutcome, Error> {
        if self.session_state.is_paused() {
            log::trace!("ignored {input} while paused");
            return Ok(MoveOutcome::Rejected);
        }
        let outcome = self.game_state.apply(input)?;
        if input == Input::Reset {
            self.total_frames = 0;
            self.drop_frames = self.drop_interval_frames;
        }
        if outcome.is_committed() {
            self.drop_frames = self.drop_interval_frames;
        }
        self.sync_state();
        Ok(outcome)
    }

    fn sync_state(&mut self) {
        self.session_state = match (self.session_state, self.game_state.status().is_over()) {
            (_, true) => SessionState::GameOver,
            (SessionState::GameOver, false) => SessionState::Playing,
            (state, false) => state,
        };
    }
}
