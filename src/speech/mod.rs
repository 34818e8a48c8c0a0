//! The external speech recognition collaborator.
//!
//! The core never talks to a recognizer directly. An engine implements
//! [`RecognitionEngine`] and pushes [`RecognitionEvent`]s over a plain
//! mpsc channel; the single event loop drains them one at a time, so
//! transcript application is serialized with user commands by
//! construction. Only `Final` results ever reach the token line; interim
//! text is diagnostic display.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use thiserror::Error;

pub mod engine;
pub mod scripted;

pub use engine::RecognitionEngine;
pub use scripted::ScriptedEngine;

/// Events pushed by a recognition engine, in delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Recognition actually began.
    Started,
    /// A non-final hypothesis; display only, never applied to the line.
    Interim(String),
    /// A finalized utterance, ready to splice into the line.
    Final(String),
    /// The recognizer failed; the line is left untouched.
    Error(String),
    /// Recognition ended, whether stopped, exhausted, or errored out.
    Ended,
}

pub type EventSender = Sender<RecognitionEvent>;
pub type EventReceiver = Receiver<RecognitionEvent>;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("recognition is already running")]
    AlreadyListening,

    #[error("recognition is not running")]
    NotListening,

    #[error("failed to read script {}: {source}", .path.display())]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("script {} contains no utterances", .0.display())]
    EmptyScript(PathBuf),
}
