use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::scene::SceneRenderer;
use super::view::{CanvasView, fit_square};
use crate::metrics::GameMetrics;
use crate::session::GameSession;

/// Terminal frame: HUD around the rasterized board
pub struct Renderer {
    scene: SceneRenderer,
}

impl Renderer {
    pub fn for_session(session: &GameSession) -> Self {
        Self {
            scene: SceneRenderer::for_state(session.state()),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, session: &GameSession, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(session, metrics), chunks[0]);

        let board = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Snake ");
        let board_area = Self::board_area(chunks[1]);
        let inner = board.inner(board_area);
        frame.render_widget(board, board_area);

        let canvas = self.scene.render(
            session.state(),
            session.particles(),
            session.shake_offset(),
        );
        frame.render_widget(CanvasView::new(canvas), inner);

        if session.is_game_over() {
            let popup = Self::centered(inner, 34, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(session), popup);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Square region for the board plus its border
    fn board_area(area: Rect) -> Rect {
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        let square = fit_square(inner);
        Rect {
            x: square.x.saturating_sub(1),
            y: square.y.saturating_sub(1),
            width: square.width + 2,
            height: square.height + 2,
        }
    }

    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    fn render_stats(&self, session: &GameSession, metrics: &GameMetrics) -> Paragraph<'_> {
        let state = session.state();
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value),
            Span::raw("    "),
            Span::styled("Baits: ", label),
            Span::styled(state.baits.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, session: &GameSession) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.state().score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Click or press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(session: &GameSession) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut renderer = Renderer::for_session(session);
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, session, &metrics))
            .unwrap();
        screen_text(&terminal)
    }

    #[test]
    fn test_hud_while_running() {
        let session = GameSession::with_seed(GameConfig::default(), 1).unwrap();
        let text = draw(&session);

        assert!(text.contains("Score: 0"));
        assert!(text.contains("Baits: 0"));
        assert!(text.contains("Snake"));
        assert!(text.contains("\u{2580}"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut session = GameSession::with_seed(GameConfig::default(), 1).unwrap();
        session.state_mut().score = 40;
        session.state_mut().game_over = true;

        let text = draw(&session);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 40"));
        assert!(text.contains("to restart"));
    }

    #[test]
    fn test_board_area_is_square_with_border() {
        let area = Rect::new(0, 1, 80, 28);
        let board = Renderer::board_area(area);
        let inner = Rect::new(board.x + 1, board.y + 1, board.width - 2, board.height - 2);
        assert_eq!(inner.width, inner.height * 2);
    }
}
