use std::iter;

use cubetris_engine::{ActivePiece, BOARD_DEPTH, BOARD_WIDTH, Board};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::{Cell, CellDisplay};

type Grid = [[Cell; BOARD_WIDTH]; BOARD_DEPTH];

/// The board seen from above: each column shows its stack height, and the
/// active piece's footprint is drawn over it.
#[derive(Debug)]
pub struct HeightMapDisplay<'a> {
    board: &'a Board,
    active_piece: Option<&'a ActivePiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> HeightMapDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            active_piece: None,
            block: None,
        }
    }

    pub fn active_piece(self, piece: &'a ActivePiece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        u16::try_from(BOARD_WIDTH).unwrap_or(u16::MAX) * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(BOARD_DEPTH).unwrap_or(u16::MAX) * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    /// Cells indexed `[z][x]`.
    fn grid(&self) -> Grid {
        let mut grid = [[Cell::Empty; BOARD_WIDTH]; BOARD_DEPTH];
        for (z, row) in grid.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = Cell::Height(self.board.column_height(x, z));
            }
        }
        if let Some(piece) = self.active_piece {
            for pos in piece.cells() {
                let (Ok(x), Ok(z)) = (usize::try_from(pos.x), usize::try_from(pos.z)) else {
                    continue;
                };
                if let Some(cell) = grid.get_mut(z).and_then(|row| row.get_mut(x)) {
                    *cell = Cell::Piece(piece.kind());
                }
            }
        }
        grid
    }
}

impl Widget for HeightMapDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &HeightMapDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..BOARD_WIDTH).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..BOARD_DEPTH).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<BOARD_DEPTH>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_WIDTH>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.grid()) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                CellDisplay::from_cell(cell).render(grid_cell, buf);
            }
        }
    }
}
