use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::{Board, GridPos, Shape, ShapeKind};

/// Added to anchor x and z to get board indices.
pub const CENTER_OFFSET: i32 = 5;

/// Layer new pieces appear in.
pub const SPAWN_HEIGHT: i32 = 18;

/// Range the anchor's x and z must stay within.
pub const ANCHOR_RANGE: RangeInclusive<i32> = -4..=4;

/// Bounds predicate on an anchor position in centred coordinates.
///
/// `y` must not go below the floor and `x`/`z` must stay within
/// [`ANCHOR_RANGE`]. This looks at the anchor only; footprint cells and
/// board occupancy are checked by [`ActivePiece::fits`].
#[must_use]
pub fn is_valid_move(x: i32, y: i32, z: i32) -> bool {
    y >= 0 && ANCHOR_RANGE.contains(&x) && ANCHOR_RANGE.contains(&z)
}

/// Anchor of a piece in centred coordinates.
///
/// `x` and `z` are centred on the middle of the board (`0` maps to board
/// index `CENTER_OFFSET`), `y` is the layer index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Anchor {
    pub const SPAWN: Self = Self::new(0, SPAWN_HEIGHT, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        is_valid_move(self.x, self.y, self.z)
    }

    /// Board index of the anchor cell.
    #[must_use]
    pub const fn to_grid(self) -> GridPos {
        GridPos::new(self.x + CENTER_OFFSET, self.y, self.z + CENTER_OFFSET)
    }
}

/// Number of quarter turns applied since spawn, modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orientation(u8);

impl Orientation {
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn degrees(self) -> u16 {
        self.0 as u16 * 90
    }
}

/// The piece currently under player control.
///
/// Pieces are values: moving or rotating returns a new `ActivePiece`, and the
/// game state decides whether to keep it.
///
/// # Example
///
/// ```
/// use cubetris_engine::{ActivePiece, Anchor, Board, ShapeKind};
///
/// let board = Board::new();
/// let piece = ActivePiece::new(ShapeKind::T);
/// assert_eq!(piece.anchor(), Anchor::SPAWN);
///
/// let landed = piece.settled(&board);
/// assert_eq!(landed.anchor().y, 0);
/// assert!(landed.fits(&board));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: ShapeKind,
    shape: Shape,
    anchor: Anchor,
    orientation: Orientation,
}

impl ActivePiece {
    /// Creates a piece of the given kind at the spawn anchor, unrotated.
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            anchor: Anchor::SPAWN,
            orientation: Orientation::default(),
        }
    }

    #[must_use]
    pub fn with_anchor(self, anchor: Anchor) -> Self {
        Self { anchor, ..self }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Board positions covered by this piece.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        let origin = self.anchor.to_grid();
        self.shape.cells().map(move |offset| {
            GridPos::new(
                origin.x + i32::from(offset.dx),
                origin.y,
                origin.z + i32::from(offset.dz),
            )
        })
    }

    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            anchor: self.anchor.offset(dx, dy, dz),
            ..self.clone()
        }
    }

    /// Turns the piece a quarter turn about the vertical axis through its
    /// anchor. Both the footprint and the orientation change.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            orientation: self.orientation.rotated_right(),
            ..self.clone()
        }
    }

    /// Returns whether the piece may occupy its current position.
    ///
    /// The anchor must pass [`is_valid_move`] and every footprint cell must be
    /// inside the board and unoccupied.
    #[must_use]
    pub fn fits(&self, board: &Board) -> bool {
        self.anchor.is_valid()
            && self
                .cells()
                .all(|pos| board.is_occupied(pos.x, pos.y, pos.z) == Ok(false))
    }

    /// Position the piece would come to rest at if dropped straight down.
    #[must_use]
    pub fn settled(&self, board: &Board) -> Self {
        let mut dropped = self.clone();
        loop {
            let below = dropped.moved(0, -1, 0);
            if !below.fits(board) {
                return dropped;
            }
            dropped = below;
        }
    }
}
