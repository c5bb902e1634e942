use serde::{Deserialize, Serialize};

/// A discrete player command.
///
/// Movement is expressed relative to the variant's axes: left/right move
/// along x, forward/backward move +1/-1 along the variant's second axis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Input {
    #[display("move left")]
    MoveLeft,
    #[display("move right")]
    MoveRight,
    #[display("move forward")]
    MoveForward,
    #[display("move backward")]
    MoveBackward,
    #[display("rotate")]
    Rotate,
    #[display("hard drop")]
    HardDrop,
    #[display("reset")]
    Reset,
}

impl Input {
    /// The `(d1, d2)` delta of a movement input, `None` for the others.
    #[must_use]
    pub const fn movement(self) -> Option<(i32, i32)> {
        match self {
            Self::MoveLeft => Some((-1, 0)),
            Self::MoveRight => Some((1, 0)),
            Self::MoveForward => Some((0, 1)),
            Self::MoveBackward => Some((0, -1)),
            Self::Rotate | Self::HardDrop | Self::Reset => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_deltas() {
        assert_eq!(Input::MoveLeft.movement(), Some((-1, 0)));
        assert_eq!(Input::MoveRight.movement(), Some((1, 0)));
        assert_eq!(Input::MoveForward.movement(), Some((0, 1)));
        assert_eq!(Input::MoveBackward.movement(), Some((0, -1)));
        assert_eq!(Input::Rotate.movement(), None);
        assert_eq!(Input::HardDrop.movement(), None);
        assert_eq!(Input::Reset.movement(), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Input::HardDrop).unwrap();
        assert_eq!(json, "\"hard-drop\"");
        let input: Input = serde_json::from_str("\"move-backward\"").unwrap();
        assert_eq!(input, Input::MoveBackward);
    }
}
