// Recognition status mirrored to the status line

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionStatus {
    Idle,
    Listening,
    Error(String),
}

impl RecognitionStatus {
    pub fn label(&self) -> String {
        match self {
            RecognitionStatus::Idle => "Status: Idle".to_string(),
            RecognitionStatus::Listening => "Status: Listening...".to_string(),
            RecognitionStatus::Error(reason) => format!("Status: Error - {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(RecognitionStatus::Idle.label(), "Status: Idle");
        assert_eq!(RecognitionStatus::Listening.label(), "Status: Listening...");
        assert_eq!(
            RecognitionStatus::Error("no-speech".to_string()).label(),
            "Status: Error - no-speech"
        );
    }
}
