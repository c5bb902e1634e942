use std::iter;

use cubetris_engine::{ActivePiece, BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH, Board, GridPos};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::{Cell, CellDisplay};

/// Number of columns in either vertical projection.
const COLUMNS: usize = if BOARD_WIDTH > BOARD_DEPTH {
    BOARD_WIDTH
} else {
    BOARD_DEPTH
};

/// A vertical slice direction through the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Looking along z: columns are x.
    Side,
    /// Looking along x: columns are z.
    Front,
}

impl Projection {
    pub fn title(self) -> &'static str {
        match self {
            Self::Side => "SIDE (x)",
            Self::Front => "FRONT (z)",
        }
    }

    fn columns(self) -> usize {
        match self {
            Self::Side => BOARD_WIDTH,
            Self::Front => BOARD_DEPTH,
        }
    }

    /// Screen column of a board position, or `None` if it is off the board.
    fn column_of(self, pos: GridPos) -> Option<usize> {
        let column = match self {
            Self::Side => pos.x,
            Self::Front => pos.z,
        };
        usize::try_from(column).ok().filter(|&c| c < self.columns())
    }
}

type Grid = [[Cell; COLUMNS]; BOARD_HEIGHT];

/// The board squashed along one horizontal axis.
///
/// A cell is drawn filled when any cube lies behind it. The active piece and
/// its ghost are drawn on top of the stack.
#[derive(Debug)]
pub struct ProjectionDisplay<'a> {
    board: &'a Board,
    projection: Projection,
    ghost: Option<&'a ActivePiece>,
    active_piece: Option<&'a ActivePiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ProjectionDisplay<'a> {
    pub fn new(board: &'a Board, projection: Projection) -> Self {
        Self {
            board,
            projection,
            ghost: None,
            active_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: &'a ActivePiece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
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
        u16::try_from(self.projection.columns()).unwrap_or(u16::MAX) * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(BOARD_HEIGHT).unwrap_or(u16::MAX) * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    /// Cells indexed `[y][column]`, floor first.
    fn grid(&self) -> Grid {
        let mut grid = [[Cell::Empty; COLUMNS]; BOARD_HEIGHT];
        for (row, layer) in iter::zip(&mut grid, self.board.layers()) {
            for (x, z) in layer.occupied_cells() {
                let column = match self.projection {
                    Projection::Side => x,
                    Projection::Front => z,
                };
                row[column] = Cell::Stack;
            }
        }
        if let Some(ghost) = self.ghost {
            self.overlay(&mut grid, ghost, Cell::Ghost);
        }
        if let Some(piece) = self.active_piece {
            self.overlay(&mut grid, piece, Cell::Piece(piece.kind()));
        }
        grid
    }

    fn overlay(&self, grid: &mut Grid, piece: &ActivePiece, cell: Cell) {
        for pos in piece.cells() {
            let Some(column) = self.projection.column_of(pos) else {
                continue;
            };
            let Some(row) = usize::try_from(pos.y).ok().and_then(|y| grid.get_mut(y)) else {
                continue;
            };
            if cell != Cell::Ghost || row[column] == Cell::Empty {
                row[column] = cell;
            }
        }
    }
}

impl Widget for ProjectionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &ProjectionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let columns = self.projection.columns();
        let col_constraints = (0..columns).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..BOARD_HEIGHT).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid = self.grid();
        let row_areas = area.layout::<BOARD_HEIGHT>(&vertical);
        // Top of the screen is the top of the board.
        for (row_area, row) in iter::zip(row_areas, grid.iter().rev()) {
            let cell_areas = horizontal.split(row_area);
            for (cell_area, cell) in iter::zip(cell_areas.iter(), &row[..columns]) {
                CellDisplay::from_cell(*cell).render(*cell_area, buf);
            }
        }
    }
}
