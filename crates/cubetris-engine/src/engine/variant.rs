use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Axis, Catalog};

/// How the two movement deltas map onto the board axes.
///
/// The first delta always moves along x. The second moves along
/// `second_axis`, which is `Y` when the board is viewed from the side and `Z`
/// when it is viewed from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisConvention {
    pub second_axis: Axis,
    /// Whether a blocked downward move commits the piece. When `false` only
    /// the drop tick and hard drop commit.
    pub blocked_descent_commits: bool,
}

impl AxisConvention {
    /// Anchor delta `(dx, dy, dz)` for a movement of `(d1, d2)`.
    #[must_use]
    pub const fn delta(self, d1: i32, d2: i32) -> (i32, i32, i32) {
        match self.second_axis {
            Axis::Y => (d1, d2, 0),
            Axis::X | Axis::Z => (d1, 0, d2),
        }
    }
}

/// Rules that differ between the side-view and top-view games.
///
/// # Example
///
/// ```
/// use cubetris_engine::{Axis, Catalog, Variant, VariantKind};
///
/// let variant = VariantKind::Top.variant();
/// assert_eq!(variant, Variant::TOP);
/// assert_eq!(variant.axes.second_axis, Axis::Z);
/// assert_eq!(variant.catalog, Catalog::Extended);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    pub kind: VariantKind,
    pub axes: AxisConvention,
    pub catalog: Catalog,
}

impl Variant {
    /// Side view: arrows move along x and y, a blocked soft drop commits, and
    /// shapes come from the classic catalog.
    pub const SIDE: Self = Self {
        kind: VariantKind::Side,
        axes: AxisConvention {
            second_axis: Axis::Y,
            blocked_descent_commits: true,
        },
        catalog: Catalog::Classic,
    };

    /// Top view: arrows move along x and z, rejected moves are no-ops, and
    /// shapes come from the extended catalog.
    pub const TOP: Self = Self {
        kind: VariantKind::Top,
        axes: AxisConvention {
            second_axis: Axis::Z,
            blocked_descent_commits: false,
        },
        catalog: Catalog::Extended,
    };
}

impl Default for Variant {
    fn default() -> Self {
        Self::SIDE
    }
}

/// Name of a [`Variant`] preset, as used in configuration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    #[default]
    #[display("side")]
    Side,
    #[display("top")]
    Top,
}

impl VariantKind {
    pub const ALL: [Self; 2] = [Self::Side, Self::Top];

    #[must_use]
    pub const fn variant(self) -> Variant {
        match self {
            Self::Side => Variant::SIDE,
            Self::Top => Variant::TOP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown variant {name:?}, expected `side` or `top`")]
pub struct ParseVariantError {
    name: String,
}

impl FromStr for VariantKind {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseVariantError { name: s.to_owned() })
    }
}
