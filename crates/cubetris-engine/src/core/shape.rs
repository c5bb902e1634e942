use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Largest number of cells in any catalog footprint.
pub const MAX_SHAPE_CELLS: usize = 4;

/// Offset of one footprint cell from the piece anchor, within a single layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellOffset {
    pub dx: i8,
    pub dz: i8,
}

impl CellOffset {
    #[must_use]
    pub const fn new(dx: i8, dz: i8) -> Self {
        Self { dx, dz }
    }

    /// Quarter turn about the vertical axis through the anchor.
    #[must_use]
    const fn rotated(self) -> Self {
        Self {
            dx: -self.dz,
            dz: self.dx,
        }
    }
}

/// A piece footprint: the set of `(dx, dz)` cells a piece covers in its layer.
///
/// Footprints are built from the row templates of [`ShapeKind::template_rows`]
/// (rows run along z, columns along x) and are centred on a pivot cell, so
/// that rotating a footprint turns it in place about the piece anchor.
///
/// Cells are kept sorted; two footprints covering the same cells compare
/// equal regardless of how they were produced.
///
/// # Example
///
/// ```
/// use cubetris_engine::ShapeKind;
///
/// let shape = ShapeKind::I.shape();
/// let turned = shape.rotated();
/// assert_ne!(shape, turned);
/// assert_eq!(turned.rotated().rotated().rotated(), shape);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    cells: ArrayVec<CellOffset, MAX_SHAPE_CELLS>,
}

impl Shape {
    /// Builds a footprint from template rows of 0/1 cells.
    ///
    /// The pivot is the cell at `((width - 1) / 2, (depth - 1) / 2)` of the
    /// template's bounding box.
    #[must_use]
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let depth = rows.len();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let pivot_x = width.saturating_sub(1) / 2;
        let pivot_z = depth.saturating_sub(1) / 2;

        let mut cells = ArrayVec::new();
        for (z, row) in rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                cells.push(CellOffset::new(
                    signed_offset(x, pivot_x),
                    signed_offset(z, pivot_z),
                ));
            }
        }
        cells.sort_unstable();
        Self { cells }
    }

    /// Returns this footprint turned 90° about the vertical axis.
    ///
    /// The logical footprint is what changes; anchor and layer stay put.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut cells: ArrayVec<_, MAX_SHAPE_CELLS> =
            self.cells.iter().map(|cell| cell.rotated()).collect();
        cells.sort_unstable();
        Self { cells }
    }

    pub fn cells(&self) -> impl ExactSizeIterator<Item = CellOffset> + '_ {
        self.cells.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn signed_offset(index: usize, pivot: usize) -> i8 {
    let index = i8::try_from(index).unwrap_or(i8::MAX);
    let pivot = i8::try_from(pivot).unwrap_or(i8::MAX);
    index - pivot
}

/// Named shape templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    L,
    J,
    T,
    O,
    S,
    Z,
    Single,
}

impl ShapeKind {
    pub const ALL: [Self; 8] = [
        Self::I,
        Self::L,
        Self::J,
        Self::T,
        Self::O,
        Self::S,
        Self::Z,
        Self::Single,
    ];

    /// The 2D template, one slice per z row.
    #[must_use]
    pub const fn template_rows(self) -> &'static [&'static [u8]] {
        match self {
            Self::I => &[&[1], &[1], &[1], &[1]],
            Self::L => &[&[1, 0], &[1, 0], &[1, 1]],
            Self::J => &[&[0, 1], &[0, 1], &[1, 1]],
            Self::T => &[&[1, 1, 1], &[0, 1, 0]],
            Self::O => &[&[1, 1], &[1, 1]],
            Self::S => &[&[0, 1, 1], &[1, 1, 0]],
            Self::Z => &[&[1, 1, 0], &[0, 1, 1]],
            Self::Single => &[&[1]],
        }
    }

    /// The footprint in spawn orientation.
    #[must_use]
    pub fn shape(self) -> Shape {
        Shape::from_rows(self.template_rows())
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::I => 'I',
            Self::L => 'L',
            Self::J => 'J',
            Self::T => 'T',
            Self::O => 'O',
            Self::S => 'S',
            Self::Z => 'Z',
            Self::Single => '1',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::I),
            'L' => Some(Self::L),
            'J' => Some(Self::J),
            'T' => Some(Self::T),
            'O' => Some(Self::O),
            'S' => Some(Self::S),
            'Z' => Some(Self::Z),
            '1' => Some(Self::Single),
            _ => None,
        }
    }
}

/// The set of shapes a game draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Catalog {
    /// I, L, T and O.
    #[default]
    Classic,
    /// Every [`ShapeKind`], including J, S, Z and the single cube.
    Extended,
}

impl Catalog {
    #[must_use]
    pub const fn kinds(self) -> &'static [ShapeKind] {
        match self {
            Self::Classic => &[ShapeKind::I, ShapeKind::L, ShapeKind::T, ShapeKind::O],
            Self::Extended => &ShapeKind::ALL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(shape: &Shape) -> Vec<(i8, i8)> {
        shape.cells().map(|c| (c.dx, c.dz)).collect()
    }

    #[test]
    fn test_template_cell_counts() {
        for kind in ShapeKind::ALL {
            let expected = if kind == ShapeKind::Single { 1 } else { 4 };
            assert_eq!(kind.shape().len(), expected, "{kind:?}");
        }
    }

    #[test]
    fn test_i_shape_is_centred_on_pivot() {
        let shape = ShapeKind::I.shape();
        assert_eq!(offsets(&shape), vec![(0, -1), (0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_rotate_i_shape() {
        let turned = ShapeKind::I.shape().rotated();
        assert_eq!(offsets(&turned), vec![(-2, 0), (-1, 0), (0, 0), (1, 0)]);
    }

    #[test]
    fn test_rotate_t_shape() {
        // ###
        // .#.
        let shape = ShapeKind::T.shape();
        assert_eq!(offsets(&shape), vec![(-1, 0), (0, 0), (0, 1), (1, 0)]);
        let turned = shape.rotated();
        assert_eq!(offsets(&turned), vec![(-1, 0), (0, -1), (0, 0), (0, 1)]);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in ShapeKind::ALL {
            let shape = kind.shape();
            let back = shape.rotated().rotated().rotated().rotated();
            assert_eq!(back, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_rotation_keeps_cell_count() {
        for kind in ShapeKind::ALL {
            let shape = kind.shape();
            assert_eq!(shape.rotated().len(), shape.len());
        }
    }

    #[test]
    fn test_single_is_rotation_invariant() {
        let single = ShapeKind::Single.shape();
        assert_eq!(single.rotated(), single);
    }

    #[test]
    fn test_shape_kind_char_conversion() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(ShapeKind::from_char('X'), None);
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(Catalog::Classic.kinds().len(), 4);
        assert_eq!(Catalog::Extended.kinds().len(), 8);
        assert!(
            Catalog::Classic
                .kinds()
                .iter()
                .all(|kind| Catalog::Extended.kinds().contains(kind))
        );
    }
}
