use crossterm::event::KeyEvent;

/// Events delivered by the event loop, one at a time.
#[derive(Debug, Clone, derive_more::IsVariant)]
pub(super) enum TuiEvent {
    /// A tick interval elapsed.
    Tick,
    /// The screen should be redrawn.
    Render,
    /// A key was pressed.
    Key(KeyEvent),
}
