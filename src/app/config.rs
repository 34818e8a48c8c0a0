// Runtime tunables for the event loop and the demo engine

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pause before a scripted utterance finalizes (default 1500ms)
    pub utterance_cadence: Duration,

    /// How long a boundary flash stays on screen (default 250ms)
    pub flash_duration: Duration,

    /// Input poll timeout for the event loop (default 50ms)
    pub poll_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utterance_cadence: Duration::from_millis(1500),
            flash_duration: Duration::from_millis(250),
            poll_timeout: Duration::from_millis(50),
        }
    }
}
