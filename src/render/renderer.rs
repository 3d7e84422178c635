use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph,
        canvas::{Canvas, Circle, Context, Painter, Shape},
    },
};

use super::theme::Palette;
use crate::game::{Arena, GameState, GameStatus, Position};
use crate::metrics::GameMetrics;

/// Filled circle; ratatui's `Circle` only strokes the outline
struct Disc {
    x: f64,
    y: f64,
    radius: f64,
    color: Color,
}

impl Shape for Disc {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        const RINGS: u32 = 4;
        for ring in 0..=RINGS {
            let r = self.radius * f64::from(ring) / f64::from(RINGS);
            for step in 0..72u32 {
                let angle = f64::from(step * 5).to_radians();
                if let Some((x, y)) =
                    painter.get_point(self.x + r * angle.cos(), self.y + r * angle.sin())
                {
                    painter.paint(x, y, self.color);
                }
            }
        }
    }
}

/// Screen-space centre of a cell: (-R, -R) lands on the origin, y grows downward
pub fn cell_center(pos: Position, radius: u32, segment_size: f64) -> (f64, f64) {
    let r = f64::from(radius);
    (
        (f64::from(pos.x) + r) * segment_size,
        (f64::from(pos.y) + r) * segment_size,
    )
}

/// Largest area inside `area` whose cells form a visual square (two columns per row)
pub fn board_area(area: Rect) -> Rect {
    let side = (area.width / 2).min(area.height);
    let width = side * 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - side) / 2,
        width,
        height: side,
    }
}

pub struct Renderer {
    arena: Arena,
    segment_size: f64,
    palette: Palette,
}

impl Renderer {
    pub fn new(arena: Arena, segment_size: f64, palette: Palette) -> Self {
        Self {
            arena,
            segment_size,
            palette,
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Arena
                Constraint::Length(2), // Start / game over prompt
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);
        frame.render_widget(self.render_arena(state), board_area(chunks[1]));

        if let Some(prompt) = self.render_prompt(state) {
            frame.render_widget(prompt, chunks[2]);
        }

        frame.render_widget(self.render_controls(), chunks[3]);
    }

    fn render_arena<'a>(&'a self, state: &'a GameState) -> Canvas<'a, impl Fn(&mut Context) + 'a> {
        let size = self.segment_size;
        let radius = self.arena.radius();
        let extent = 2.0 * f64::from(radius) * size;
        // One cell of margin so shapes on the rim are not clipped
        let margin = size;
        let palette = self.palette;

        Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Circle Snake "),
            )
            .marker(Marker::Braille)
            .x_bounds([-margin, extent + margin])
            .y_bounds([-margin, extent + margin])
            .paint(move |ctx| {
                // Canvas y points up; flip so screen y grows downward
                let flip = |(x, y): (f64, f64)| (x, extent - y);

                ctx.draw(&Circle {
                    x: extent / 2.0,
                    y: extent / 2.0,
                    radius: extent / 2.0,
                    color: palette.border,
                });

                for segment in &state.snake.body {
                    let (x, y) = flip(cell_center(*segment, radius, size));
                    ctx.draw(&Disc {
                        x,
                        y,
                        radius: size / 2.0,
                        color: palette.snake,
                    });
                }

                let (x, y) = flip(cell_center(state.food, radius, size));
                ctx.draw(&Disc {
                    x,
                    y,
                    radius: size / 1.5,
                    color: palette.food,
                });
            })
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_prompt(&self, state: &GameState) -> Option<Paragraph<'_>> {
        let key = |k: &'static str| {
            Span::styled(
                k,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let lines = match state.status {
            GameStatus::Running => return None,
            GameStatus::NotStarted => vec![Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                key("Enter"),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ])],
            GameStatus::Over => vec![
                Line::from(vec![
                    Span::styled(
                        "GAME OVER",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  Final Score: {}", state.score()),
                        Style::default().fg(Color::Yellow),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Press ", Style::default().fg(Color::Gray)),
                    key("R"),
                    Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                    Span::styled(
                        "Q",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" to quit", Style::default().fg(Color::Gray)),
                ]),
            ],
        };

        Some(Paragraph::new(lines).alignment(Alignment::Center))
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Snake;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(state: &GameState) -> String {
        let renderer = Renderer::new(state.arena, 15.0, Palette::default());
        let metrics = GameMetrics::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| renderer.render(frame, state, &metrics))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_cell_center_mapping() {
        assert_eq!(cell_center(Position::new(-20, -20), 20, 15.0), (0.0, 0.0));
        assert_eq!(cell_center(Position::ORIGIN, 20, 15.0), (300.0, 300.0));
        assert_eq!(cell_center(Position::new(20, 0), 20, 15.0), (600.0, 300.0));
        assert_eq!(cell_center(Position::new(0, -1), 1, 10.0), (10.0, 0.0));
    }

    #[test]
    fn test_board_area_is_centered_square() {
        let area = board_area(Rect::new(0, 0, 100, 30));
        assert_eq!(area, Rect::new(20, 0, 60, 30));

        let area = board_area(Rect::new(0, 5, 40, 50));
        assert_eq!(area, Rect::new(0, 20, 40, 20));
    }

    #[test]
    fn test_start_prompt() {
        let state = GameState::new(Arena::new(5), Position::new(2, 2));
        let text = screen_text(&state);
        assert!(text.contains("to start"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_prompt() {
        let mut state = GameState::new(Arena::new(5), Position::new(2, 2));
        state.snake = Snake {
            body: vec![Position::new(1, 0), Position::ORIGIN],
        };
        state.status = GameStatus::Over;
        let text = screen_text(&state);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 1"));
    }

    #[test]
    fn test_running_has_no_prompt() {
        let mut state = GameState::new(Arena::new(5), Position::new(2, 2));
        state.status = GameStatus::Running;
        let text = screen_text(&state);
        assert!(!text.contains("to start"));
        assert!(text.contains("Circle Snake"));
    }
}
