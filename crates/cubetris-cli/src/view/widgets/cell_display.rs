use cubetris_engine::{BOARD_HEIGHT, ShapeKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::style;

/// What one screen cell of a board view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    /// Settled cubes.
    Stack,
    /// Landing position of the active piece.
    Ghost,
    Piece(ShapeKind),
    /// Column height in a top-down view.
    Height(usize),
}

/// Two-character labels for column heights.
const HEIGHT_LABELS: [&str; BOARD_HEIGHT + 1] = [
    " .", " 1", " 2", " 3", " 4", " 5", " 6", " 7", " 8", " 9", "10", "11", "12", "13", "14",
    "15", "16", "17", "18", "19", "20",
];

#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::new(style::EMPTY_DOT, "."),
            Cell::Stack => Self::new(style::STACK, ""),
            Cell::Ghost => Self::new(style::GHOST, "[]"),
            Cell::Piece(kind) => Self::new(shape_style(kind), ""),
            Cell::Height(height) => {
                let style = match height {
                    0 => style::EMPTY_DOT,
                    1..=6 => style::HEIGHT_LOW,
                    7..=13 => style::HEIGHT_MID,
                    _ => style::HEIGHT_HIGH,
                };
                Self::new(style, HEIGHT_LABELS[height.min(BOARD_HEIGHT)])
            }
        }
    }
}

pub fn shape_style(kind: ShapeKind) -> Style {
    match kind {
        ShapeKind::I => style::I_CUBE,
        ShapeKind::O => style::O_CUBE,
        ShapeKind::S => style::S_CUBE,
        ShapeKind::Z => style::Z_CUBE,
        ShapeKind::J => style::J_CUBE,
        ShapeKind::L => style::L_CUBE,
        ShapeKind::T => style::T_CUBE,
        ShapeKind::Single => style::SINGLE_CUBE,
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Fill the whole area, not just the cells covered by the symbol.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_labels() {
        assert_eq!(CellDisplay::from_cell(Cell::Height(0)).symbol, " .");
        assert_eq!(CellDisplay::from_cell(Cell::Height(7)).symbol, " 7");
        assert_eq!(CellDisplay::from_cell(Cell::Height(20)).symbol, "20");
        assert_eq!(CellDisplay::from_cell(Cell::Height(99)).symbol, "20");
    }

    #[test]
    fn test_height_style_buckets() {
        assert_eq!(CellDisplay::from_cell(Cell::Height(3)).style, style::HEIGHT_LOW);
        assert_eq!(CellDisplay::from_cell(Cell::Height(10)).style, style::HEIGHT_MID);
        assert_eq!(CellDisplay::from_cell(Cell::Height(18)).style, style::HEIGHT_HIGH);
    }
}
