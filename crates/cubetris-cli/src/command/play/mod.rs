use cubetris_engine::{GameSession, PieceSeed};

use crate::{config::GameArg, tui::Tui};

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    game: GameArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { game } = arg;

    let config = game.resolve()?;
    let seed = config.seed.unwrap_or_else(rand::random::<PieceSeed>);
    log::info!("starting {} game with seed {seed}", config.variant);

    let session = GameSession::with_seed(
        app::FPS,
        config.variant(),
        config.drop_interval(),
        seed,
    );
    let mut app = PlayApp::new(session);
    Tui::new().run(&mut app)?;

    let game = app.session().game_state();
    log::info!(
        "finished with score {} after {} pieces",
        game.score(),
        game.stats().placed_pieces()
    );
    Ok(())
}
