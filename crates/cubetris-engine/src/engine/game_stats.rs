use serde::Serialize;

/// Points for each committed piece.
pub const PLACEMENT_SCORE: usize = 10;
/// Points for each cleared layer.
pub const LAYER_CLEAR_SCORE: usize = 100;

/// Score and counters of one game.
///
/// The score only ever grows: every commit adds [`PLACEMENT_SCORE`] plus
/// [`LAYER_CLEAR_SCORE`] per cleared layer.
///
/// # Example
///
/// ```
/// use cubetris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(2);
///
/// assert_eq!(stats.score(), 210);
/// assert_eq!(stats.placed_pieces(), 1);
/// assert_eq!(stats.cleared_layers(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    placed_pieces: usize,
    cleared_layers: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            placed_pieces: 0,
            cleared_layers: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Number of pieces committed into the board.
    #[must_use]
    pub const fn placed_pieces(&self) -> usize {
        self.placed_pieces
    }

    #[must_use]
    pub const fn cleared_layers(&self) -> usize {
        self.cleared_layers
    }

    /// Records one committed piece that cleared `cleared_layers` layers.
    pub const fn complete_piece_drop(&mut self, cleared_layers: usize) {
        self.placed_pieces += 1;
        self.cleared_layers += cleared_layers;
        self.score += PLACEMENT_SCORE + LAYER_CLEAR_SCORE * cleared_layers;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.placed_pieces(), 0);
        assert_eq!(stats.cleared_layers(), 0);
    }

    #[test]
    fn test_placement_without_clear() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(0);
        stats.complete_piece_drop(0);
        assert_eq!(stats.score(), 20);
        assert_eq!(stats.placed_pieces(), 2);
    }

    #[test]
    fn test_score_accumulates() {
        let mut stats = GameStats::new();
        let mut previous = 0;
        for cleared in [0, 1, 0, 3, 2] {
            stats.complete_piece_drop(cleared);
            assert!(stats.score() > previous);
            previous = stats.score();
        }
        assert_eq!(stats.score(), 5 * 10 + 6 * 100);
        assert_eq!(stats.cleared_layers(), 6);
    }
}
