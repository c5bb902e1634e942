use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::tui::Tui;

/// An application driven by [`Tui::run`].
pub trait App {
    /// Called once before the first event. Configure tick rate and render
    /// mode here.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles a key press. Repeats and releases are filtered out.
    fn handle_key(&mut self, tui: &mut Tui, key: KeyEvent);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by one tick.
    fn update(&mut self, tui: &mut Tui);
}
