/// Application events produced by the command deck
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    Quit,
    Help,
    LoadScript(String),
    InvalidCommand(String),
    None,
}
