use crate::app::{App, AppEvent, AppMode};
use crate::line::Direction as LineDirection;
use crate::speech::EventReceiver;
use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::view;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new() -> Result<Self, io::Error> {
        let guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            _guard: guard,
        })
    }

    /// Single-threaded dispatcher: key input, recognition events, and the
    /// frame tick all run here, so every editor mutation completes before
    /// the next one starts.
    pub fn run_event_loop(&mut self, app: &mut App, events: EventReceiver) -> io::Result<()> {
        let mut last_frame = Instant::now();
        let frame_tick = Duration::from_millis(1000 / 60);

        self.render_frame(app)?;
        loop {
            if app.mode() == AppMode::Quit {
                return Ok(());
            }

            // Drain the speech channel before polling input; transcripts
            // apply in delivery order, one at a time.
            while let Ok(event) = events.try_recv() {
                app.on_recognition_event(event);
            }
            app.tick();

            match event::poll(app.config().poll_timeout) {
                Ok(true) => {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Release {
                            Self::dispatch_key(app, key);
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    // Propagate I/O errors instead of ignoring them
                    return Err(e);
                }
            }

            if last_frame.elapsed() >= frame_tick {
                self.render_frame(app)?;
                last_frame = Instant::now();
            }
        }
    }

    fn dispatch_key(app: &mut App, key: KeyEvent) {
        match app.mode() {
            AppMode::Editing => match key.code {
                KeyCode::Left => app.move_left(),
                KeyCode::Right => app.move_right(),
                KeyCode::Backspace | KeyCode::Delete => app.delete_selected(),
                KeyCode::Char(' ') => app.toggle_activation(),
                KeyCode::Char('q') => app.quit(),
                KeyCode::Char('h') => app.apply_event(AppEvent::Help),
                KeyCode::Char(c @ (':' | '@')) => {
                    app.open_command_deck();
                    app.command_push(c);
                }
                _ => {}
            },
            AppMode::Command => match key.code {
                KeyCode::Esc => app.close_command_deck(),
                KeyCode::Enter => app.submit_command(),
                KeyCode::Backspace => app.command_backspace(),
                KeyCode::Char(c) => app.command_push(c),
                _ => {}
            },
            AppMode::Quit => {}
        }
    }

    pub fn render_frame(&mut self, app: &App) -> io::Result<()> {
        let state = app.render_state();

        self.terminal.draw(|frame| {
            let area = frame.area();

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(2),
                ])
                .split(area);

            frame.render_widget(view::render_status_line(&state), rows[0]);

            let line_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .split(rows[1]);

            frame.render_widget(
                view::render_boundary_marker(state.flash == Some(LineDirection::Left)),
                line_chunks[0],
            );
            let offset = view::scroll_offset(&state, line_chunks[1].width);
            frame.render_widget(
                view::render_token_line(&state).scroll((0, offset)),
                line_chunks[1],
            );
            frame.render_widget(
                view::render_boundary_marker(state.flash == Some(LineDirection::Right)),
                line_chunks[2],
            );

            frame.render_widget(view::render_deck(&state), rows[2]);
        })?;

        Ok(())
    }
}
