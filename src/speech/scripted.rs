// Scripted recognition engine - plays canned utterances from a worker thread

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use super::{EventSender, RecognitionEngine, RecognitionEvent, SpeechError};

const DEMO_SCRIPT: &[&str] = &[
    "voxline keeps dictated text as tokens",
    "arrow keys move the selection",
    "backspace removes the selected token",
    "space starts and stops listening",
];

/// A recognition engine fed by a script instead of a microphone. Each
/// utterance is previewed word by word as interim results, then delivered
/// as a final result after the configured cadence.
///
/// Stop requests are advisory: the worker only checks the flag between
/// utterances, so an utterance in flight still finalizes.
pub struct ScriptedEngine {
    queue: Arc<Mutex<VecDeque<String>>>,
    cadence: Duration,
    tx: EventSender,
    stop: Arc<AtomicBool>,
    listening: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl ScriptedEngine {
    pub fn new(tx: EventSender, cadence: Duration) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            cadence,
            tx,
            stop: Arc::new(AtomicBool::new(false)),
            listening: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Engine preloaded with the built-in demo script.
    pub fn demo(tx: EventSender, cadence: Duration) -> Self {
        let engine = Self::new(tx, cadence);
        engine
            .queue
            .lock()
            .expect("script queue poisoned")
            .extend(DEMO_SCRIPT.iter().map(|s| s.to_string()));
        engine
    }

    /// Engine loaded from a script file, one utterance per line. Blank
    /// lines are skipped.
    pub fn from_file(
        tx: EventSender,
        cadence: Duration,
        path: &Path,
    ) -> Result<Self, SpeechError> {
        let engine = Self::new(tx, cadence);
        engine.load_script(path)?;
        Ok(engine)
    }

    /// Replace the queued utterances with the contents of `path`. Returns
    /// how many utterances were loaded.
    pub fn load_script(&self, path: &Path) -> Result<usize, SpeechError> {
        let content = std::fs::read_to_string(path).map_err(|source| SpeechError::ScriptRead {
            path: path.to_path_buf(),
            source,
        })?;
        let utterances: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if utterances.is_empty() {
            return Err(SpeechError::EmptyScript(PathBuf::from(path)));
        }
        let count = utterances.len();
        let mut queue = self.queue.lock().expect("script queue poisoned");
        queue.clear();
        queue.extend(utterances);
        info!(count, path = %path.display(), "script loaded");
        Ok(count)
    }

    pub fn queued(&self) -> usize {
        self.queue.lock().expect("script queue poisoned").len()
    }
}

impl RecognitionEngine for ScriptedEngine {
    fn request_start(&mut self) -> Result<(), SpeechError> {
        if self.listening.load(Ordering::SeqCst) {
            return Err(SpeechError::AlreadyListening);
        }
        self.stop.store(false, Ordering::SeqCst);
        self.listening.store(true, Ordering::SeqCst);

        let queue = Arc::clone(&self.queue);
        let tx = self.tx.clone();
        let stop = Arc::clone(&self.stop);
        let listening = Arc::clone(&self.listening);
        let cadence = self.cadence;

        let handle = thread::spawn(move || {
            if tx.send(RecognitionEvent::Started).is_err() {
                listening.store(false, Ordering::SeqCst);
                return;
            }
            loop {
                // Stop requests take effect here, between utterances only.
                if stop.load(Ordering::SeqCst) {
                    break;
                }
                let utterance = {
                    let mut queue = queue.lock().expect("script queue poisoned");
                    queue.pop_front()
                };
                let Some(utterance) = utterance else {
                    debug!("script exhausted");
                    break;
                };
                let mut preview = String::new();
                for word in utterance.split_whitespace() {
                    if !preview.is_empty() {
                        preview.push(' ');
                    }
                    preview.push_str(word);
                    if tx.send(RecognitionEvent::Interim(preview.clone())).is_err() {
                        listening.store(false, Ordering::SeqCst);
                        return;
                    }
                    thread::sleep(cadence / 4);
                }
                thread::sleep(cadence);
                // The utterance in flight finalizes even after a stop request.
                if tx.send(RecognitionEvent::Final(utterance)).is_err() {
                    listening.store(false, Ordering::SeqCst);
                    return;
                }
            }
            listening.store(false, Ordering::SeqCst);
            let _ = tx.send(RecognitionEvent::Ended);
        });
        self.worker = Some(handle);
        Ok(())
    }

    fn request_stop(&mut self) -> Result<(), SpeechError> {
        if !self.listening.load(Ordering::SeqCst) {
            return Err(SpeechError::NotListening);
        }
        self.stop.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }
}

impl Drop for ScriptedEngine {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        // The worker is left to wind down on its own; joining here could
        // block the terminal teardown for a full cadence.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::mpsc;
    use std::time::Duration;

    const RECV_TIMEOUT: Duration = Duration::from_secs(5);

    fn collect_until_ended(rx: &mpsc::Receiver<RecognitionEvent>) -> Vec<RecognitionEvent> {
        let mut events = Vec::new();
        loop {
            let event = rx.recv_timeout(RECV_TIMEOUT).expect("engine went silent");
            let ended = event == RecognitionEvent::Ended;
            events.push(event);
            if ended {
                return events;
            }
        }
    }

    #[test]
    fn test_finals_arrive_in_script_order() {
        let (tx, rx) = mpsc::channel();
        let mut engine = ScriptedEngine::new(tx, Duration::from_millis(1));
        {
            let mut queue = engine.queue.lock().unwrap();
            queue.push_back("one two".to_string());
            queue.push_back("three".to_string());
        }
        engine.request_start().unwrap();

        let events = collect_until_ended(&rx);
        assert_eq!(events.first(), Some(&RecognitionEvent::Started));
        let finals: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                RecognitionEvent::Final(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(finals, vec!["one two", "three"]);
    }

    #[test]
    fn test_interims_preview_the_utterance() {
        let (tx, rx) = mpsc::channel();
        let mut engine = ScriptedEngine::new(tx, Duration::from_millis(1));
        engine.queue.lock().unwrap().push_back("a b".to_string());
        engine.request_start().unwrap();

        let events = collect_until_ended(&rx);
        let interims: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                RecognitionEvent::Interim(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(interims, vec!["a", "a b"]);
    }

    #[test]
    fn test_stop_is_advisory_for_the_utterance_in_flight() {
        let (tx, rx) = mpsc::channel();
        let mut engine = ScriptedEngine::new(tx, Duration::from_millis(50));
        {
            let mut queue = engine.queue.lock().unwrap();
            queue.push_back("first".to_string());
            queue.push_back("second".to_string());
        }
        engine.request_start().unwrap();

        // Wait until the first utterance is provably in flight.
        loop {
            match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
                RecognitionEvent::Interim(_) => break,
                RecognitionEvent::Started => continue,
                other => panic!("unexpected event {other:?}"),
            }
        }
        engine.request_stop().unwrap();

        let events = collect_until_ended(&rx);
        let finals: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                RecognitionEvent::Final(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        // The in-flight final still lands; the second utterance does not.
        assert_eq!(finals, vec!["first"]);
    }

    #[test]
    fn test_double_start_is_rejected() {
        let (tx, rx) = mpsc::channel();
        let mut engine = ScriptedEngine::new(tx, Duration::from_millis(200));
        engine.queue.lock().unwrap().push_back("hold".to_string());
        engine.request_start().unwrap();
        assert!(matches!(
            engine.request_start(),
            Err(SpeechError::AlreadyListening)
        ));
        engine.request_stop().unwrap();
        collect_until_ended(&rx);
    }

    #[test]
    fn test_stop_when_idle_is_rejected() {
        let (tx, _rx) = mpsc::channel();
        let mut engine = ScriptedEngine::new(tx, Duration::from_millis(1));
        assert!(matches!(
            engine.request_stop(),
            Err(SpeechError::NotListening)
        ));
    }

    #[test]
    fn test_engine_reports_idle_after_script_exhausts() {
        let (tx, rx) = mpsc::channel();
        let mut engine = ScriptedEngine::new(tx, Duration::from_millis(1));
        engine.queue.lock().unwrap().push_back("only".to_string());
        engine.request_start().unwrap();
        collect_until_ended(&rx);
        assert!(!engine.is_listening());
    }

    #[test]
    fn test_load_script_from_file() {
        let path = std::env::temp_dir().join("voxline_test_script.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "first utterance").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  second utterance  ").unwrap();

        let (tx, _rx) = mpsc::channel();
        let engine = ScriptedEngine::new(tx, Duration::from_millis(1));
        let count = engine.load_script(&path).unwrap();
        assert_eq!(count, 2);
        assert_eq!(engine.queued(), 2);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_script_fails() {
        let (tx, _rx) = mpsc::channel();
        let engine = ScriptedEngine::new(tx, Duration::from_millis(1));
        let err = engine
            .load_script(Path::new("no_such_voxline_script.txt"))
            .unwrap_err();
        assert!(matches!(err, SpeechError::ScriptRead { .. }));
    }

    #[test]
    fn test_empty_script_fails() {
        let path = std::env::temp_dir().join("voxline_test_empty_script.txt");
        File::create(&path).unwrap();

        let (tx, _rx) = mpsc::channel();
        let engine = ScriptedEngine::new(tx, Duration::from_millis(1));
        let err = engine.load_script(&path).unwrap_err();
        assert!(matches!(err, SpeechError::EmptyScript(_)));

        std::fs::remove_file(&path).unwrap();
    }
}
