use std::sync::mpsc;

use voxline::app::{App, Config};
use voxline::logging;
use voxline::speech::ScriptedEngine;
use voxline::ui::TuiManager;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let log_guard = logging::init()?;
    tracing::info!(log_file = %log_guard.log_file.display(), "voxline starting");

    let config = Config::default();
    let (events_tx, events_rx) = mpsc::channel();
    let engine = ScriptedEngine::demo(events_tx.clone(), config.utterance_cadence);

    let mut app = App::new(Box::new(engine), events_tx, config);
    let mut tui = TuiManager::new()?;

    tui.run_event_loop(&mut app, events_rx)?;

    Ok(())
}
