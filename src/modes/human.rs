use anyhow::{Context, Result, anyhow};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::ticker::Ticker;
use crate::game::{Action, GameConfig, GameEngine, GameState, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    ticker: Ticker,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let palette = config.theme.palette().map_err(|e| anyhow!(e))?;
        let mut engine = GameEngine::new(&config);
        let state = engine.new_game();

        Ok(Self {
            renderer: Renderer::new(engine.arena(), config.segment_size, palette),
            engine,
            state,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            ticker: Ticker::new(config.tick_interval()),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut updates = self.engine.subscribe();

        // Only the elapsed-time readout needs a clock; the board redraws on change
        let mut clock = interval(Duration::from_secs(1));

        tracing::info!(
            radius = self.engine.arena().radius(),
            tick_ms = self.ticker.period().as_millis() as u64,
            "session started"
        );
        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, terminal)?,
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = self.ticker.tick() => {
                    self.update_game();
                }

                // Redraw when the engine reports a change
                changed = updates.changed() => {
                    if changed.is_ok() {
                        self.draw(terminal)?;
                    }
                }

                _ = clock.tick() => {
                    if self.state.is_running() {
                        self.draw(terminal)?;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.ticker.cancel();
        tracing::info!(
            games_played = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "session ended"
        );
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &self.state, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(
        &mut self,
        event: Event,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::GameAction(action) => self.apply(action),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Resize(_, _) => self.draw(terminal)?,
            _ => {}
        }

        Ok(())
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Steer(direction) => {
                self.engine.set_direction(&mut self.state, direction);
            }
            Action::Start => {
                // Start and Restart are only offered while no game is running
                if !self.state.is_running() {
                    self.start_game();
                }
            }
        }
    }

    fn update_game(&mut self) {
        if let TickOutcome::GameOver(_) = self.engine.tick(&mut self.state) {
            self.ticker.cancel();
            self.metrics.on_game_over(self.state.score());
        }
    }

    fn start_game(&mut self) {
        self.engine.start(&mut self.state);
        self.metrics.on_game_start();
        self.ticker.start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameStatus, Position};

    fn mode(radius: u32) -> HumanMode {
        let mut config = GameConfig::new(radius);
        config.seed = Some(5);
        HumanMode::new(config).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode(20);
        assert_eq!(mode.state.status, GameStatus::NotStarted);
        assert!(!mode.ticker.is_running());
        assert_eq!(mode.state.score(), 0);
    }

    #[test]
    fn test_bad_theme_is_rejected() {
        let mut config = GameConfig::default();
        config.theme.border_color = "nope".to_string();
        assert!(HumanMode::new(config).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_runs_ticker() {
        let mut mode = mode(20);
        mode.apply(Action::Start);
        assert!(mode.state.is_running());
        assert!(mode.ticker.is_running());

        mode.ticker.tick().await;
        mode.update_game();
        assert_eq!(mode.state.snake.head(), Position::new(1, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_cancels_ticker_and_restart_resumes() {
        let mut mode = mode(1);
        mode.apply(Action::Start);
        mode.state.food = Position::new(0, 1);

        mode.update_game(); // (1, 0)
        mode.update_game(); // (2, 0) is outside
        assert!(mode.state.is_over());
        assert!(!mode.ticker.is_running());
        assert_eq!(mode.metrics.games_played, 1);

        mode.apply(Action::Start);
        assert!(mode.state.is_running());
        assert!(mode.ticker.is_running());
        assert_eq!(mode.state.snake.head(), Position::ORIGIN);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_ignored_while_running() {
        let mut mode = mode(20);
        mode.apply(Action::Start);
        mode.state.food = Position::new(-5, -5);
        mode.update_game();

        mode.apply(Action::Start);
        assert_eq!(mode.state.snake.head(), Position::new(1, 0));
    }

    #[test]
    fn test_steering_before_start_is_kept() {
        let mut mode = mode(20);
        mode.apply(Action::Steer(Direction::Up));
        assert_eq!(mode.state.direction, Direction::Up);
    }
}
