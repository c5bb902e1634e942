use cubetris_engine::{SessionState, VariantKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

const SIDE_PLAYING: &[KeyBinding<'static>] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["Q", "Esc"], "Quit"),
];

const TOP_PLAYING: &[KeyBinding<'static>] = &[
    (&["←", "→"], "Move X"),
    (&["↑", "↓"], "Move Z"),
    (&["R"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["Q", "Esc"], "Quit"),
];

const PAUSED: &[KeyBinding<'static>] = &[(&["P"], "Resume"), (&["Q", "Esc"], "Quit")];

const GAME_OVER: &[KeyBinding<'static>] = &[(&["Space"], "Restart"), (&["Q", "Esc"], "Quit")];

#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self { bindings }
    }

    /// The controls available in `state` for the given variant.
    pub fn for_session(variant: VariantKind, state: SessionState) -> Self {
        let bindings = match (state, variant) {
            (SessionState::Playing, VariantKind::Side) => SIDE_PLAYING,
            (SessionState::Playing, VariantKind::Top) => TOP_PLAYING,
            (SessionState::Paused, _) => PAUSED,
            (SessionState::GameOver, _) => GAME_OVER,
        };
        Self::new(bindings)
    }

    fn spans(&self) -> Vec<Span<'a>> {
        let mut spans = vec![];
        for (i, (keys, desc)) in self.bindings.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", ITEM_SEPARATOR_STYLE));
            }
            for (i, key) in keys.iter().copied().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("/", KEY_SEPARATOR_STYLE));
                }
                spans.push(Span::styled(key, KEY_STYLE));
            }
            spans.push(Span::from(" "));
            spans.push(Span::styled(desc, DESCRIPTION_STYLE));
        }
        spans
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);
const ITEM_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Line::from(self.spans()).centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_text(display: &KeyBindingDisplay) -> String {
        display
            .spans()
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn test_bindings_follow_variant() {
        let side = KeyBindingDisplay::for_session(VariantKind::Side, SessionState::Playing);
        assert!(plain_text(&side).contains("↑ Rotate"));

        let top = KeyBindingDisplay::for_session(VariantKind::Top, SessionState::Playing);
        assert!(plain_text(&top).contains("↑/↓ Move Z"));
        assert!(plain_text(&top).contains("R Rotate"));
    }

    #[test]
    fn test_bindings_follow_session_state() {
        let paused = KeyBindingDisplay::for_session(VariantKind::Top, SessionState::Paused);
        assert_eq!(plain_text(&paused), "P Resume | Q/Esc Quit");

        let over = KeyBindingDisplay::for_session(VariantKind::Side, SessionState::GameOver);
        assert_eq!(plain_text(&over), "Space Restart | Q/Esc Quit");
    }
}
