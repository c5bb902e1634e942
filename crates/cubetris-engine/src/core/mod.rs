pub use self::{board::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape;

use serde::{Deserialize, Serialize};

/// Number of horizontal layers stacked along the y axis.
pub const BOARD_HEIGHT: usize = 20;
/// Number of cells along the x axis.
pub const BOARD_WIDTH: usize = 10;
/// Number of cells along the z axis.
pub const BOARD_DEPTH: usize = 10;

/// One of the three grid axes.
///
/// `y` is vertical (layers), `x` and `z` span each horizontal layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[display("x")]
    X,
    #[display("y")]
    Y,
    #[display("z")]
    Z,
}

/// A cell position in board index space.
///
/// Valid positions satisfy `0 <= x < BOARD_WIDTH`, `0 <= y < BOARD_HEIGHT`
/// and `0 <= z < BOARD_DEPTH`. Values outside these ranges are representable
/// so that candidate positions can be checked before they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}
