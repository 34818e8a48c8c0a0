// App aggregate - editor session, recognition lifecycle, command deck

use std::path::Path;
use std::time::Instant;

use tracing::{info, trace, warn};

use crate::line::{Direction, Effect, EditorSession};
use crate::speech::{EventSender, RecognitionEngine, RecognitionEvent, ScriptedEngine};
use crate::ui::command::{command_to_app_event, parse_command};

use super::config::Config;
use super::event::AppEvent;
use super::mode::AppMode;
use super::render_state::{token_cells, RenderState};
use super::status::RecognitionStatus;

pub const HELP_TEXT: &str =
    "Left/Right move, Backspace deletes, Space toggles listening, @file loads a script, :q quits";

pub struct App {
    mode: AppMode,
    session: EditorSession,
    engine: Box<dyn RecognitionEngine>,
    /// Kept so a freshly loaded script engine can deliver on the same
    /// channel the event loop is already draining.
    events_tx: EventSender,
    status: RecognitionStatus,
    interim: Option<String>,
    notice: Option<String>,
    command_input: String,
    flash: Option<(Direction, Instant)>,
    config: Config,
}

impl App {
    pub fn new(engine: Box<dyn RecognitionEngine>, events_tx: EventSender, config: Config) -> Self {
        let mut app = Self {
            mode: AppMode::Editing,
            session: EditorSession::new(),
            engine,
            events_tx,
            status: RecognitionStatus::Idle,
            interim: None,
            notice: Some(HELP_TEXT.to_string()),
            command_input: String::new(),
            flash: None,
            config,
        };
        app.pump_effects();
        app
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn render_state(&self) -> RenderState {
        let (tokens, selected) = token_cells(&self.session);
        RenderState {
            mode: self.mode,
            status: self.status.label(),
            interim: self.interim.clone(),
            notice: self.notice.clone(),
            command_input: self.command_input.clone(),
            tokens,
            selected,
            flash: self.flash.map(|(direction, _)| direction),
        }
    }

    // --- Editing commands -------------------------------------------------

    pub fn move_left(&mut self) {
        self.session.move_left();
        self.pump_effects();
    }

    pub fn move_right(&mut self) {
        self.session.move_right();
        self.pump_effects();
    }

    pub fn delete_selected(&mut self) {
        if let Err(err) = self.session.delete_selected() {
            warn!(%err, "delete failed");
        }
        self.pump_effects();
    }

    /// Start the recognizer if idle, otherwise request a stop. Failures
    /// surface on the status line only.
    pub fn toggle_activation(&mut self) {
        if self.engine.is_listening() {
            if let Err(err) = self.engine.request_stop() {
                warn!(%err, "stop request failed");
                self.notice = Some(err.to_string());
            }
            // Status flips to Idle once the engine reports Ended.
        } else {
            self.notice = None;
            if let Err(err) = self.engine.request_start() {
                warn!(%err, "start request failed");
                self.status =
                    RecognitionStatus::Error("starting failed - check permissions?".to_string());
            }
        }
    }

    pub fn quit(&mut self) {
        self.mode = AppMode::Quit;
    }

    // --- Command deck -----------------------------------------------------

    pub fn open_command_deck(&mut self) {
        self.mode = AppMode::Command;
        self.command_input.clear();
        self.notice = None;
    }

    pub fn close_command_deck(&mut self) {
        self.mode = AppMode::Editing;
        self.command_input.clear();
    }

    pub fn command_push(&mut self, c: char) {
        self.command_input.push(c);
    }

    pub fn command_backspace(&mut self) {
        self.command_input.pop();
    }

    pub fn submit_command(&mut self) {
        let input = std::mem::take(&mut self.command_input);
        self.mode = AppMode::Editing;
        if input.trim().is_empty() {
            return;
        }
        let event = command_to_app_event(parse_command(&input));
        self.apply_event(event);
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => self.mode = AppMode::Quit,
            AppEvent::Help => self.notice = Some(HELP_TEXT.to_string()),
            AppEvent::LoadScript(path) => self.load_script(&path),
            AppEvent::InvalidCommand(input) => {
                self.notice = Some(format!("Unknown command: {input}"));
            }
            AppEvent::None => {}
        }
    }

    fn load_script(&mut self, path: &str) {
        let cadence = self.config.utterance_cadence;
        match ScriptedEngine::from_file(self.events_tx.clone(), cadence, Path::new(path)) {
            Ok(engine) => {
                if self.engine.is_listening() {
                    let _ = self.engine.request_stop();
                }
                let count = engine.queued();
                self.engine = Box::new(engine);
                self.notice = Some(format!("Loaded {count} utterances from {path}"));
            }
            Err(err) => {
                warn!(%err, "script load failed");
                self.notice = Some(err.to_string());
            }
        }
    }

    // --- Recognition events -----------------------------------------------

    pub fn on_recognition_event(&mut self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Started => {
                info!("recognition started");
                self.status = RecognitionStatus::Listening;
                self.interim = None;
            }
            RecognitionEvent::Interim(text) => {
                self.interim = Some(text);
            }
            RecognitionEvent::Final(text) => {
                self.interim = None;
                if let Err(err) = self.session.insert_transcript(&text) {
                    warn!(%err, "transcript could not be applied");
                }
                self.pump_effects();
            }
            RecognitionEvent::Error(reason) => {
                warn!(%reason, "recognition error");
                self.interim = None;
                self.status = RecognitionStatus::Error(reason);
                if self.engine.is_listening() {
                    let _ = self.engine.request_stop();
                }
            }
            RecognitionEvent::Ended => {
                info!("recognition ended");
                self.interim = None;
                // An error stays visible until the next start.
                if !matches!(self.status, RecognitionStatus::Error(_)) {
                    self.status = RecognitionStatus::Idle;
                }
            }
        }
    }

    /// Expire the boundary flash; called every loop iteration.
    pub fn tick(&mut self) {
        if let Some((_, since)) = self.flash {
            if since.elapsed() >= self.config.flash_duration {
                self.flash = None;
            }
        }
    }

    fn pump_effects(&mut self) {
        for effect in self.session.drain_effects() {
            match effect {
                Effect::BoundaryReached(direction) => {
                    self.flash = Some((direction, Instant::now()));
                }
                // Selection and scrolling are re-derived from the render
                // state every frame; nothing to store here.
                other => trace!(?other, "presentation effect"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::SpeechError;
    use std::sync::mpsc;
    use std::time::Duration;

    struct StubEngine {
        listening: bool,
        fail_start: bool,
        stop_requests: usize,
    }

    impl StubEngine {
        fn new() -> Self {
            Self {
                listening: false,
                fail_start: false,
                stop_requests: 0,
            }
        }
    }

    impl RecognitionEngine for StubEngine {
        fn request_start(&mut self) -> Result<(), SpeechError> {
            if self.fail_start {
                return Err(SpeechError::AlreadyListening);
            }
            self.listening = true;
            Ok(())
        }

        fn request_stop(&mut self) -> Result<(), SpeechError> {
            self.stop_requests += 1;
            self.listening = false;
            Ok(())
        }

        fn is_listening(&self) -> bool {
            self.listening
        }
    }

    fn test_app() -> App {
        let (tx, _rx) = mpsc::channel();
        App::new(Box::new(StubEngine::new()), tx, Config::default())
    }

    fn line_text(app: &App) -> String {
        app.session()
            .sequence()
            .iter()
            .map(|(_, t)| t.text())
            .collect()
    }

    #[test]
    fn test_final_transcript_lands_on_the_line() {
        let mut app = test_app();
        app.on_recognition_event(RecognitionEvent::Final("hello world".to_string()));
        assert!(line_text(&app).contains("hello world"));
    }

    #[test]
    fn test_interim_is_display_only() {
        let mut app = test_app();
        let before = line_text(&app);
        app.on_recognition_event(RecognitionEvent::Interim("hel".to_string()));
        assert_eq!(line_text(&app), before);
        assert_eq!(app.render_state().interim.as_deref(), Some("hel"));
        app.on_recognition_event(RecognitionEvent::Final("hello".to_string()));
        assert_eq!(app.render_state().interim, None);
    }

    #[test]
    fn test_started_and_ended_drive_the_status_line() {
        let mut app = test_app();
        app.on_recognition_event(RecognitionEvent::Started);
        assert_eq!(app.render_state().status, "Status: Listening...");
        app.on_recognition_event(RecognitionEvent::Ended);
        assert_eq!(app.render_state().status, "Status: Idle");
    }

    #[test]
    fn test_recognition_error_leaves_the_line_untouched() {
        let mut app = test_app();
        app.on_recognition_event(RecognitionEvent::Final("kept".to_string()));
        let before = line_text(&app);
        app.toggle_activation();
        app.on_recognition_event(RecognitionEvent::Error("no-speech".to_string()));
        assert_eq!(line_text(&app), before);
        assert_eq!(app.render_state().status, "Status: Error - no-speech");
    }

    #[test]
    fn test_error_stops_an_engine_that_reports_itself_running() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(Box::new(StubEngine::new()), tx, Config::default());
        app.toggle_activation();
        app.on_recognition_event(RecognitionEvent::Error("audio-capture".to_string()));
        // The stub flipped to stopped via the forced stop request.
        assert!(!app.engine.is_listening());
    }

    #[test]
    fn test_error_status_survives_the_trailing_ended_event() {
        let mut app = test_app();
        app.on_recognition_event(RecognitionEvent::Error("network".to_string()));
        app.on_recognition_event(RecognitionEvent::Ended);
        assert_eq!(app.render_state().status, "Status: Error - network");
    }

    #[test]
    fn test_start_failure_degrades_to_a_status_message() {
        let (tx, _rx) = mpsc::channel();
        let mut engine = StubEngine::new();
        engine.fail_start = true;
        let mut app = App::new(Box::new(engine), tx, Config::default());
        app.toggle_activation();
        assert!(app.render_state().status.starts_with("Status: Error"));
        assert_eq!(app.mode(), AppMode::Editing);
    }

    #[test]
    fn test_boundary_flash_sets_and_expires() {
        let (tx, _rx) = mpsc::channel();
        let config = Config {
            flash_duration: Duration::from_millis(1),
            ..Config::default()
        };
        let mut app = App::new(Box::new(StubEngine::new()), tx, config);
        app.move_right();
        assert_eq!(app.render_state().flash, Some(Direction::Right));
        std::thread::sleep(Duration::from_millis(5));
        app.tick();
        assert_eq!(app.render_state().flash, None);
    }

    #[test]
    fn test_command_deck_quit_flow() {
        let mut app = test_app();
        app.open_command_deck();
        assert_eq!(app.mode(), AppMode::Command);
        for c in ":q".chars() {
            app.command_push(c);
        }
        app.submit_command();
        assert_eq!(app.mode(), AppMode::Quit);
    }

    #[test]
    fn test_unknown_command_posts_a_notice() {
        let mut app = test_app();
        app.open_command_deck();
        for c in "bogus".chars() {
            app.command_push(c);
        }
        app.submit_command();
        assert_eq!(app.mode(), AppMode::Editing);
        assert_eq!(
            app.render_state().notice.as_deref(),
            Some("Unknown command: bogus")
        );
    }

    #[test]
    fn test_load_script_replaces_the_engine() {
        let path = std::env::temp_dir().join("voxline_test_app_script.txt");
        std::fs::write(&path, "scripted line\n").unwrap();

        let mut app = test_app();
        app.apply_event(AppEvent::LoadScript(path.display().to_string()));
        let notice = app.render_state().notice.unwrap();
        assert!(notice.starts_with("Loaded 1 utterances"), "got {notice}");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_script_surfaces_the_error() {
        let mut app = test_app();
        app.apply_event(AppEvent::LoadScript("no_such_file.txt".to_string()));
        let notice = app.render_state().notice.unwrap();
        assert!(notice.contains("failed to read script"), "got {notice}");
    }
}
