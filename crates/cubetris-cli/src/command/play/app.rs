use crossterm::event::{KeyCode, KeyEvent};
use cubetris_engine::{GameSession, Input, SessionState, VariantKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    tui::{App, RenderMode, Tui},
    view::widgets::{KeyBindingDisplay, SessionDisplay},
};

pub(crate) const FPS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Play(Input),
    TogglePause,
    Quit,
}

/// Maps a key press to an action, given the variant's layout and the
/// session state.
fn key_action(variant: VariantKind, code: KeyCode, state: SessionState) -> Option<Action> {
    let action = match (state, code) {
        (_, KeyCode::Char('q' | 'Q') | KeyCode::Esc) => Action::Quit,
        (SessionState::Playing | SessionState::Paused, KeyCode::Char('p' | 'P')) => {
            Action::TogglePause
        }
        (SessionState::GameOver, KeyCode::Char(' ')) => Action::Play(Input::Reset),
        (SessionState::Playing, code) => Action::Play(playing_input(variant, code)?),
        _ => return None,
    };
    Some(action)
}

fn playing_input(variant: VariantKind, code: KeyCode) -> Option<Input> {
    let input = match (variant, code) {
        (_, KeyCode::Left) => Input::MoveLeft,
        (_, KeyCode::Right) => Input::MoveRight,
        (_, KeyCode::Char(' ')) => Input::HardDrop,
        (VariantKind::Side, KeyCode::Down) => Input::MoveBackward,
        (VariantKind::Side, KeyCode::Up) => Input::Rotate,
        (VariantKind::Top, KeyCode::Up) => Input::MoveBackward,
        (VariantKind::Top, KeyCode::Down) => Input::MoveForward,
        (VariantKind::Top, KeyCode::Char('r' | 'R')) => Input::Rotate,
        _ => return None,
    };
    Some(input)
}

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn variant(&self) -> VariantKind {
        self.session.game_state().variant().kind
    }
}

impl App for PlayApp {
    #[expect(clippy::cast_precision_loss)]
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(FPS as f64);
        tui.set_render_mode(RenderMode::throttled_from_rate(FPS as f64));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_key(&mut self, _tui: &mut Tui, key: KeyEvent) {
        let Some(action) = key_action(self.variant(), key.code, self.session.session_state())
        else {
            return;
        };
        match action {
            Action::Play(input) => match self.session.handle_input(input) {
                Ok(outcome) => log::trace!("{input}: {outcome:?}"),
                Err(err) => log::debug!("{err}"),
            },
            Action::TogglePause => self.session.toggle_pause(),
            Action::Quit => self.is_exiting = true,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session);
        let help_text = KeyBindingDisplay::for_session(self.variant(), self.session.session_state());

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _tui: &mut Tui) {
        if let Some(outcome) = self.session.increment_frame() {
            log::trace!("tick: {outcome:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_keys() {
        let action = |code| key_action(VariantKind::Side, code, SessionState::Playing);
        assert_eq!(action(KeyCode::Left), Some(Action::Play(Input::MoveLeft)));
        assert_eq!(action(KeyCode::Down), Some(Action::Play(Input::MoveBackward)));
        assert_eq!(action(KeyCode::Up), Some(Action::Play(Input::Rotate)));
        assert_eq!(action(KeyCode::Char(' ')), Some(Action::Play(Input::HardDrop)));
        assert_eq!(action(KeyCode::Char('r')), None);
    }

    #[test]
    fn test_top_keys() {
        let action = |code| key_action(VariantKind::Top, code, SessionState::Playing);
        assert_eq!(action(KeyCode::Right), Some(Action::Play(Input::MoveRight)));
        assert_eq!(action(KeyCode::Up), Some(Action::Play(Input::MoveBackward)));
        assert_eq!(action(KeyCode::Down), Some(Action::Play(Input::MoveForward)));
        assert_eq!(action(KeyCode::Char('r')), Some(Action::Play(Input::Rotate)));
    }

    #[test]
    fn test_paused_keys() {
        let action = |code| key_action(VariantKind::Side, code, SessionState::Paused);
        assert_eq!(action(KeyCode::Left), None);
        assert_eq!(action(KeyCode::Char('p')), Some(Action::TogglePause));
        assert_eq!(action(KeyCode::Esc), Some(Action::Quit));
    }

    #[test]
    fn test_game_over_keys() {
        let action = |code| key_action(VariantKind::Top, code, SessionState::GameOver);
        assert_eq!(action(KeyCode::Char(' ')), Some(Action::Play(Input::Reset)));
        assert_eq!(action(KeyCode::Char('p')), None);
        assert_eq!(action(KeyCode::Char('q')), Some(Action::Quit));
    }
}
