use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, GameEngine, GameEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::scheduler::TickScheduler;

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_period: Duration,
    paused: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let tick_period = config.tick_interval();
        let engine = GameEngine::new(config).context("Failed to start game")?;

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_period,
            paused: false,
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

        let mut scheduler = TickScheduler::new(self.tick_period);
        scheduler.start();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        info!(
            "game started on a {}x{} board, ticking every {:?}",
            self.engine.board().size,
            self.engine.board().size,
            self.tick_period
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(Event::Key(key))) = maybe_event {
                        let action = self.input_handler.handle_key_event(key);
                        self.apply(action, &mut scheduler)?;
                    }
                }

                // Game logic tick; never fires once the scheduler is stopped
                _ = scheduler.tick() => {
                    self.update_game(&mut scheduler);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let state = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &state, &self.metrics, self.paused);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.apply(KeyAction::Quit, &mut scheduler)?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn apply(&mut self, action: KeyAction, scheduler: &mut TickScheduler) -> Result<()> {
        match action {
            KeyAction::Turn(direction) => {
                if !self.paused {
                    self.engine.request_direction(direction);
                }
            }
            KeyAction::TogglePause => self.toggle_pause(scheduler),
            KeyAction::Restart => self.reset_game(scheduler)?,
            KeyAction::Quit => {
                self.engine.end_game();
                self.drain_events(scheduler);
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
        Ok(())
    }

    fn update_game(&mut self, scheduler: &mut TickScheduler) {
        let result = self.engine.tick();
        if result.terminated {
            scheduler.stop();
        }
        self.drain_events(scheduler);
    }

    fn drain_events(&mut self, scheduler: &mut TickScheduler) {
        for event in self.engine.drain_events() {
            if let GameEvent::GameOver { score, .. } = event {
                scheduler.stop();
                self.metrics.on_game_over(score);
            }
        }
    }

    fn toggle_pause(&mut self, scheduler: &mut TickScheduler) {
        if !self.engine.is_running() {
            return;
        }

        self.paused = !self.paused;
        if self.paused {
            scheduler.stop();
            self.metrics.pause();
        } else {
            scheduler.start();
            self.metrics.resume();
        }
    }

    fn reset_game(&mut self, scheduler: &mut TickScheduler) -> Result<()> {
        self.engine.reset().context("Failed to restart game")?;
        self.metrics.on_game_start();
        self.paused = false;
        scheduler.start();
        Ok(())
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
