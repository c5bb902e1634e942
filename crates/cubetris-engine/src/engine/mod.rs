//! Game rules and state management.
//!
//! This module drives the [`core`](crate::core) data structures:
//!
//! - [`GameState`] - Board, active piece, score and status, with the
//!   tick/input state machine
//! - [`Variant`] - Axis convention and shape catalog of a game
//! - [`PieceSource`] - Seeded uniform shape selection
//! - [`GameStats`] - Score, placed pieces and cleared layers
//! - [`GameSession`] - Frame-driven wrapper adding drop timing, pause and
//!   elapsed time
//!
//! # Game Flow
//!
//! 1. Create a [`GameState`] for a variant (optionally with a [`PieceSeed`])
//! 2. Feed it [`Input`]s and periodic ticks
//! 3. A piece that cannot descend is committed, full layers are cleared and a
//!    new piece spawns
//! 4. The game is over once a piece settles at the spawn height; only
//!    [`Input::Reset`] is accepted then
//!
//! # Example
//!
//! ```
//! use cubetris_engine::{GameState, Input, MoveOutcome, PieceSeed, Variant};
//!
//! let mut game = GameState::with_seed(Variant::SIDE, PieceSeed::from_u128(7));
//!
//! game.apply(Input::MoveLeft).unwrap();
//! let outcome = game.apply(Input::HardDrop).unwrap();
//!
//! assert!(matches!(outcome, MoveOutcome::Committed { .. }));
//! assert_eq!(game.score(), 10);
//! ```

pub use self::{game_state::*, game_stats::*, input::*, piece_source::*, session::*, variant::*};

mod game_state;
mod game_stats;
mod input;
mod piece_source;
mod session;
mod variant;
