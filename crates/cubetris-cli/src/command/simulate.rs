use std::path::PathBuf;

use cubetris_engine::{
    Board, GameState, GameStats, Input, MoveOutcome, PieceSeed, Status, VariantKind,
};
use rand::Rng as _;
use serde::Serialize;

use crate::{config::GameArg, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    game: GameArg,
    /// Number of drop ticks to simulate
    #[clap(long, default_value_t = 1000)]
    ticks: u64,
    /// Write the summary to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

/// Inputs played before each tick, in order, repeating.
///
/// `None` lets the tick pass without input.
const INPUT_SCRIPT: &[Option<Input>] = &[
    Some(Input::MoveLeft),
    Some(Input::Rotate),
    None,
    Some(Input::MoveRight),
    Some(Input::MoveRight),
    Some(Input::MoveForward),
    None,
    Some(Input::MoveBackward),
    Some(Input::Rotate),
    Some(Input::MoveLeft),
    Some(Input::HardDrop),
    None,
];

#[derive(Debug, Serialize)]
struct SimulationSummary {
    variant: VariantKind,
    seed: PieceSeed,
    ticks: u64,
    status: Status,
    stats: GameStats,
    commits: usize,
    occupied_cells: usize,
    max_column_height: usize,
    /// Column heights indexed `[z][x]`.
    column_heights: Vec<Vec<usize>>,
}

impl SimulationSummary {
    fn new(game: &GameState, ticks: u64, commits: usize) -> Self {
        let board = game.board();
        let column_heights: Vec<Vec<usize>> = (0..Board::DEPTH)
            .map(|z| (0..Board::WIDTH).map(|x| board.column_height(x, z)).collect())
            .collect();
        let max_column_height = column_heights.iter().flatten().copied().max().unwrap_or(0);
        Self {
            variant: game.variant().kind,
            seed: game.seed(),
            ticks,
            status: game.status(),
            stats: game.stats().clone(),
            commits,
            occupied_cells: board.occupied_count(),
            max_column_height,
            column_heights,
        }
    }
}

fn simulate(game: &mut GameState, ticks: u64) -> SimulationSummary {
    let mut commits = 0;
    let mut elapsed = 0;
    for (script_input, _) in INPUT_SCRIPT.iter().cycle().zip(0..ticks) {
        if game.status().is_over() {
            break;
        }
        if let Some(input) = script_input
            && let Ok(MoveOutcome::Committed { .. }) = game.apply(*input)
        {
            commits += 1;
        }
        if game.tick().is_committed() {
            commits += 1;
        }
        elapsed += 1;
    }
    log::info!(
        "simulated {elapsed} ticks: {} with score {}",
        game.status(),
        game.score()
    );
    SimulationSummary::new(game, elapsed, commits)
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        game,
        ticks,
        output,
    } = arg;

    let config = game.resolve()?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut game = GameState::with_seed(config.variant(), seed);

    let summary = simulate(&mut game, *ticks);
    Output::save_json(&summary, output.as_deref())
}

#[cfg(test)]
mod tests {
    use cubetris_engine::Variant;

    use super::*;

    fn seeded(variant: Variant) -> GameState {
        GameState::with_seed(variant, PieceSeed::from_u128(0xbeef))
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let a = simulate(&mut seeded(Variant::TOP), 200);
        let b = simulate(&mut seeded(Variant::TOP), 200);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn test_commits_match_placed_pieces() {
        let summary = simulate(&mut seeded(Variant::SIDE), 300);
        assert_eq!(summary.commits, summary.stats.placed_pieces());
        assert!(summary.commits > 0);
    }

    #[test]
    fn test_stops_at_game_over() {
        let summary = simulate(&mut seeded(Variant::SIDE), 100_000);
        assert_eq!(summary.status, Status::Over);
        assert!(summary.ticks < 100_000);
    }

    #[test]
    fn test_summary_json_fields() {
        let summary = simulate(&mut seeded(Variant::TOP), 10);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["variant"], "top");
        assert_eq!(json["seed"], "0000000000000000000000000000beef");
        assert_eq!(json["ticks"], 10);
        assert_eq!(json["status"], "running");
        assert_eq!(json["column_heights"].as_array().unwrap().len(), 10);
    }
}
