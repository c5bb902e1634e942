//! Simulation core for a 3D falling-block puzzle.
//!
//! [`core`] holds the data structures (board, shapes, the active piece) and
//! [`engine`] drives them: the [`GameState`] state machine, seeded piece
//! selection, statistics and the frame-driven [`GameSession`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Error {
    /// A grid index outside the fixed board dimensions.
    #[display("{axis} index {index} is outside the board")]
    OutOfBounds { axis: Axis, index: i32 },
    /// An input the game does not accept in its current status.
    #[display("{input} is not accepted while the game is {status}")]
    InvalidTransition { status: Status, input: Input },
}
