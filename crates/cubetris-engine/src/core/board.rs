use std::fmt;

use crate::Error;

use super::{Axis, BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH, GridPos};

const LAYER_CELLS: usize = BOARD_WIDTH * BOARD_DEPTH;
const FULL_LAYER_MASK: u128 = (1 << LAYER_CELLS) - 1;

/// One horizontal slice of the board.
///
/// Each of the `BOARD_WIDTH × BOARD_DEPTH` cells is one bit of a `u128`;
/// bit `z * BOARD_WIDTH + x` holds cell `(x, z)`. The remaining high bits are
/// always zero.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Layer {
    bits: u128,
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer({:#027x})", self.bits)
    }
}

impl Layer {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const FULL: Self = Self {
        bits: FULL_LAYER_MASK,
    };

    #[inline]
    const fn bit(x: usize, z: usize) -> u128 {
        1 << (z * BOARD_WIDTH + x)
    }

    /// Returns whether cell `(x, z)` is occupied.
    ///
    /// Coordinates must already be inside the layer.
    #[inline]
    #[must_use]
    pub const fn is_occupied(self, x: usize, z: usize) -> bool {
        self.bits & Self::bit(x, z) != 0
    }

    #[inline]
    fn occupy(&mut self, x: usize, z: usize) {
        self.bits |= Self::bit(x, z);
    }

    #[inline]
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.bits == FULL_LAYER_MASK
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[must_use]
    pub const fn occupied_count(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates over the occupied `(x, z)` cells of this layer.
    pub fn occupied_cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..BOARD_DEPTH)
            .flat_map(|z| (0..BOARD_WIDTH).map(move |x| (x, z)))
            .filter(move |&(x, z)| self.is_occupied(x, z))
    }

    /// Creates a layer from ASCII art, mostly for tests.
    ///
    /// `#` is an occupied cell and `.` an empty one. Each non-blank line is one
    /// z row (first line is z = 0) and must contain exactly `BOARD_WIDTH` cells.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut layer = Self::EMPTY;
        let lines = art.lines().filter(|line| !line.trim().is_empty());
        for (z, line) in lines.enumerate() {
            assert!(z < BOARD_DEPTH, "layer art has more than {BOARD_DEPTH} rows");
            let cells: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                cells.len(),
                BOARD_WIDTH,
                "each row must have exactly {BOARD_WIDTH} cells, got {} at row {z}",
                cells.len(),
            );
            for (x, &ch) in cells.iter().enumerate() {
                if ch == '#' {
                    layer.occupy(x, z);
                }
            }
        }
        layer
    }
}

/// Fixed-size 3D occupancy grid.
///
/// The board stores `BOARD_HEIGHT` layers from the floor (`y = 0`) upwards.
/// Its dimensions never change; pieces become part of the board when they
/// are committed, and full layers are removed by [`Board::clear_layer`],
/// which collapses everything above them by one layer.
///
/// Coordinates are `i32` so that callers can ask about candidate positions
/// without converting first. Any coordinate outside the grid is reported as
/// [`Error::OutOfBounds`].
///
/// # Example
///
/// ```
/// use cubetris_engine::Board;
///
/// let mut board = Board::new();
/// board.set_occupied(3, 0, 7).unwrap();
/// assert!(board.is_occupied(3, 0, 7).unwrap());
/// assert!(board.is_occupied(10, 0, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    layers: [Layer; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn index_on(axis: Axis, index: i32, len: usize) -> Result<usize, Error> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(Error::OutOfBounds { axis, index })
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;
    pub const DEPTH: usize = BOARD_DEPTH;

    pub const EMPTY: Self = Self {
        layers: [Layer::EMPTY; BOARD_HEIGHT],
    };

    /// Creates a board with every cell cleared.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    fn locate(x: i32, y: i32, z: i32) -> Result<(usize, usize, usize), Error> {
        Ok((
            index_on(Axis::X, x, BOARD_WIDTH)?,
            index_on(Axis::Y, y, BOARD_HEIGHT)?,
            index_on(Axis::Z, z, BOARD_DEPTH)?,
        ))
    }

    /// Returns whether `(x, y, z)` lies inside the grid.
    #[must_use]
    pub fn contains(x: i32, y: i32, z: i32) -> bool {
        Self::locate(x, y, z).is_ok()
    }

    pub fn is_occupied(&self, x: i32, y: i32, z: i32) -> Result<bool, Error> {
        let (x, y, z) = Self::locate(x, y, z)?;
        Ok(self.layers[y].is_occupied(x, z))
    }

    pub fn set_occupied(&mut self, x: i32, y: i32, z: i32) -> Result<(), Error> {
        let (x, y, z) = Self::locate(x, y, z)?;
        self.layers[y].occupy(x, z);
        Ok(())
    }

    /// Marks every given cell as occupied.
    ///
    /// All positions are validated before the first cell is written, so on
    /// error the board is left untouched.
    pub fn fill_cells(&mut self, cells: &[GridPos]) -> Result<(), Error> {
        let located = cells
            .iter()
            .map(|pos| Self::locate(pos.x, pos.y, pos.z))
            .collect::<Result<Vec<_>, _>>()?;
        for (x, y, z) in located {
            self.layers[y].occupy(x, z);
        }
        Ok(())
    }

    /// Returns the layer at height `y`.
    pub fn layer(&self, y: i32) -> Result<Layer, Error> {
        let y = index_on(Axis::Y, y, BOARD_HEIGHT)?;
        Ok(self.layers[y])
    }

    /// Iterates over layers from the floor upwards.
    pub fn layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers.iter().copied()
    }

    pub fn is_layer_full(&self, y: i32) -> Result<bool, Error> {
        Ok(self.layer(y)?.is_full())
    }

    /// Removes layer `y` with gravity collapse.
    ///
    /// Layers below `y` are untouched, every layer above `y` moves down by one
    /// and a fresh empty layer is inserted at the top.
    pub fn clear_layer(&mut self, y: i32) -> Result<(), Error> {
        let y = index_on(Axis::Y, y, BOARD_HEIGHT)?;
        self.layers.copy_within(y + 1.., y);
        self.layers[BOARD_HEIGHT - 1] = Layer::EMPTY;
        Ok(())
    }

    /// Clears every full layer and returns how many were removed.
    ///
    /// Layers are scanned from the floor upwards. After a clear the same
    /// height is checked again, because the layer that just dropped into it
    /// may be full as well.
    pub fn clear_full_layers(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = 0;
        while y < BOARD_HEIGHT {
            if self.layers[y].is_full() {
                self.layers.copy_within(y + 1.., y);
                self.layers[BOARD_HEIGHT - 1] = Layer::EMPTY;
                cleared += 1;
                continue;
            }
            y += 1;
        }
        cleared
    }

    /// Height of the stack in column `(x, z)`: one above its highest occupied
    /// cell, or 0 when the column is empty.
    #[must_use]
    pub fn column_height(&self, x: usize, z: usize) -> usize {
        self.layers
            .iter()
            .rposition(|layer| layer.is_occupied(x, z))
            .map_or(0, |y| y + 1)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.occupied_count()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.is_empty())
    }

    /// Replaces layer `y` wholesale.
    pub fn set_layer(&mut self, y: i32, layer: Layer) -> Result<(), Error> {
        let y = index_on(Axis::Y, y, BOARD_HEIGHT)?;
        self.layers[y] = layer;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_layer_except(board: &mut Board, y: i32, skip: (i32, i32)) {
        for z in 0..10 {
            for x in 0..10 {
                if (x, z) != skip {
                    board.set_occupied(x, y, z).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        assert!(board.is_empty());
        for y in 0..20 {
            for z in 0..10 {
                for x in 0..10 {
                    assert!(!board.is_occupied(x, y, z).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_set_and_check_cell() {
        let mut board = Board::new();
        assert!(!board.is_occupied(9, 19, 9).unwrap());
        board.set_occupied(9, 19, 9).unwrap();
        assert!(board.is_occupied(9, 19, 9).unwrap());
        assert!(!board.is_occupied(9, 19, 8).unwrap());
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut board = Board::new();
        assert_eq!(
            board.is_occupied(-1, 0, 0),
            Err(Error::OutOfBounds {
                axis: Axis::X,
                index: -1
            })
        );
        assert_eq!(
            board.set_occupied(0, 20, 0),
            Err(Error::OutOfBounds {
                axis: Axis::Y,
                index: 20
            })
        );
        assert_eq!(
            board.is_layer_full(-3),
            Err(Error::OutOfBounds {
                axis: Axis::Y,
                index: -3
            })
        );
        assert!(board.clear_layer(20).is_err());
        assert!(board.set_occupied(0, 0, 10).is_err());
        assert!(board.is_empty());
    }

    #[test]
    fn test_set_layer_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(
            board.set_layer(20, Layer::FULL),
            Err(Error::OutOfBounds {
                axis: Axis::Y,
                index: 20
            })
        );
        assert!(board.set_layer(-1, Layer::FULL).is_err());
        assert!(board.is_empty());

        board.set_layer(19, Layer::FULL).unwrap();
        assert_eq!(board.is_layer_full(19), Ok(true));
    }

    #[test]
    fn test_fill_cells_is_all_or_nothing() {
        let mut board = Board::new();
        let cells = [GridPos::new(0, 0, 0), GridPos::new(10, 0, 0)];
        assert!(board.fill_cells(&cells).is_err());
        assert!(board.is_empty());

        let cells = [GridPos::new(0, 0, 0), GridPos::new(1, 0, 0)];
        board.fill_cells(&cells).unwrap();
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_layer_becomes_full_on_last_cell() {
        let mut board = Board::new();
        fill_layer_except(&mut board, 5, (4, 6));
        assert!(!board.is_layer_full(5).unwrap());
        board.set_occupied(4, 5, 6).unwrap();
        assert!(board.is_layer_full(5).unwrap());
    }

    #[test]
    fn test_clear_layer_preserves_lower_layers_and_shifts_upper() {
        let lower = Layer::from_ascii(
            r"
            #.........
            .#........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            .........#
            ",
        );
        let upper = Layer::from_ascii(
            r"
            ##########
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ",
        );
        let mut board = Board::new();
        board.set_layer(2, lower).unwrap();
        board.set_layer(5, Layer::FULL).unwrap();
        board.set_layer(6, upper).unwrap();
        board.set_layer(19, lower).unwrap();

        board.clear_layer(5).unwrap();

        assert_eq!(board.layer(2).unwrap(), lower);
        assert_eq!(board.layer(5).unwrap(), upper);
        assert_eq!(board.layer(18).unwrap(), lower);
        assert!(board.layer(19).unwrap().is_empty());
    }

    #[test]
    fn test_clear_top_layer() {
        let mut board = Board::new();
        board.set_layer(19, Layer::FULL).unwrap();
        board.clear_layer(19).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn test_clear_full_layers_counts_stacked_layers() {
        let partial = Layer::from_ascii(
            r"
            #.........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ",
        );
        let mut board = Board::new();
        for (y, layer) in [Layer::FULL, Layer::FULL, partial, Layer::FULL]
            .into_iter()
            .enumerate()
        {
            board.set_layer(i32::try_from(y).unwrap(), layer).unwrap();
        }

        assert_eq!(board.clear_full_layers(), 3);
        assert_eq!(board.layer(0).unwrap(), partial);
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_clear_full_layers_without_full_layers() {
        let mut board = Board::new();
        fill_layer_except(&mut board, 0, (0, 0));
        let before = board.clone();
        assert_eq!(board.clear_full_layers(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_column_height() {
        let mut board = Board::new();
        assert_eq!(board.column_height(2, 3), 0);
        board.set_occupied(2, 0, 3).unwrap();
        board.set_occupied(2, 7, 3).unwrap();
        assert_eq!(board.column_height(2, 3), 8);
        assert_eq!(board.column_height(3, 2), 0);
    }

    #[test]
    fn test_layer_occupied_cells() {
        let layer = Layer::from_ascii(
            r"
            ..#.......
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            #.........
            ",
        );
        let cells: Vec<_> = layer.occupied_cells().collect();
        assert_eq!(cells, vec![(2, 0), (0, 9)]);
        assert_eq!(layer.occupied_count(), 2);
        assert_eq!(Layer::FULL.occupied_count(), 100);
    }
}
