// Recognition engine seam - the only lifecycle calls the core issues

use super::SpeechError;

/// Black-box transcript producer.
///
/// Implementations deliver [`super::RecognitionEvent`]s on the channel
/// handed to them at construction. Stopping is advisory: an utterance
/// already in flight may still deliver its final result after
/// `request_stop` returns, and the caller must accept it.
pub trait RecognitionEngine {
    /// Ask the engine to begin delivering results. May fail (for a real
    /// recognizer, e.g. a missing microphone permission); failure leaves
    /// the engine idle.
    fn request_start(&mut self) -> Result<(), SpeechError>;

    /// Ask the engine to stop after the utterance in flight, if any.
    fn request_stop(&mut self) -> Result<(), SpeechError>;

    /// Whether the engine currently reports itself running.
    fn is_listening(&self) -> bool;
}
