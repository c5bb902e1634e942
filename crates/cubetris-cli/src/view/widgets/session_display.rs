use cubetris_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{
    HeightMapDisplay, Projection, ProjectionDisplay, SessionStatsDisplay, color, style,
};

/// The whole play screen: stats and height map on the left, then the side
/// and front projections.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let game = self.session.game_state();
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.session.session_state() {
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let ghost = game.ghost_piece();
        let projection = |projection: Projection| {
            ProjectionDisplay::new(game.board(), projection)
                .ghost(&ghost)
                .active_piece(game.active_piece())
                .block(panel(projection.title()))
        };
        let side_view = projection(Projection::Side);
        let front_view = projection(Projection::Front);
        let height_map = HeightMapDisplay::new(game.board())
            .active_piece(game.active_piece())
            .block(panel("TOP").padding(block_padding));
        let session_stats =
            SessionStatsDisplay::new(self.session).block(panel("STATS").padding(block_padding));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(height_map.width(), session_stats.width())),
            Constraint::Length(side_view.width()),
            Constraint::Length(front_view.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area, height_map_area] = Layout::vertical([
            Constraint::Length(session_stats.height()),
            Constraint::Length(height_map.height()),
        ])
        .areas(left_column);
        let stats_area = stats_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(session_stats.width())]).flex(Flex::End),
        )[0];
        let height_map_area = height_map_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(height_map.width())]).flex(Flex::End),
        )[0];

        let [side_area] =
            Layout::vertical([Constraint::Length(side_view.height())]).areas(center_column);
        let [front_area] =
            Layout::vertical([Constraint::Length(front_view.height())]).areas(right_column);

        session_stats.render(stats_area, buf);
        height_map.render(height_map_area, buf);
        side_view.render(side_area, buf);
        front_view.render(front_area, buf);

        let popup = match self.session.session_state() {
            SessionState::Playing => None,
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let boards_area = side_area.union(front_area);
            let area = boards_area.centered(
                Constraint::Length(boards_area.width),
                Constraint::Length(3),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cubetris_engine::{PieceSeed, Variant};

    use super::*;

    fn rendered_text(session: &GameSession) -> String {
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(session).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn session() -> GameSession {
        GameSession::with_seed(
            60,
            Variant::SIDE,
            Duration::from_secs(1),
            PieceSeed::from_u128(3),
        )
    }

    #[test]
    fn test_renders_all_panels() {
        let text = rendered_text(&session());
        for title in ["STATS", "TOP", "SIDE (x)", "FRONT (z)"] {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(!text.contains("PAUSED"));
    }

    #[test]
    fn test_ghost_always_drawn() {
        let text = rendered_text(&session());
        assert!(text.contains("[]"));
    }

    #[test]
    fn test_paused_popup() {
        let mut session = session();
        session.toggle_pause();
        assert!(rendered_text(&session).contains("PAUSED"));
    }
}
