use async_trait::async_trait;

/// Status line shown when no recognition session is running.
pub const VOICE_IDLE_STATUS: &str = "Voice input: Inactive";
/// Status line shown when the recognizer is unavailable on this host.
pub const VOICE_UNSUPPORTED_STATUS: &str = "Speech recognition not supported.";

/// Recognition failures, mapped to fixed user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    NoSpeech,
    AudioCapture,
    NotAllowed,
    /// Anything else, carrying the recognizer's error code.
    Failed(String),
}

impl VoiceError {
    pub fn user_message(&self) -> String {
        match self {
            Self::NoSpeech => "No speech detected. Try again.".into(),
            Self::AudioCapture => "Microphone error. Check permissions.".into(),
            Self::NotAllowed => "Mic access denied. Please allow.".into(),
            Self::Failed(code) => format!("Error: {code}"),
        }
    }
}

/// Speech-to-text seam. One `listen` call is one recognition session:
/// it acquires the microphone, waits for a single utterance, and resolves
/// with the final transcript (`Ok(None)` when the session ended without
/// one, e.g. after `stop`).
#[async_trait]
pub trait VoiceRecognizer: Send {
    fn is_available(&self) -> bool {
        true
    }

    async fn listen(&mut self) -> Result<Option<String>, VoiceError>;

    /// End the current session early. The pending `listen` resolves
    /// `Ok(None)`.
    fn stop(&mut self);
}

/// Placeholder for hosts without a speech-to-text integration. The voice
/// control is disabled with a status message.
pub struct UnsupportedRecognizer;

#[async_trait]
impl VoiceRecognizer for UnsupportedRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn listen(&mut self) -> Result<Option<String>, VoiceError> {
        Err(VoiceError::Failed("unsupported".into()))
    }

    fn stop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_fixed_messages() {
        assert_eq!(
            VoiceError::NoSpeech.user_message(),
            "No speech detected. Try again."
        );
        assert_eq!(
            VoiceError::AudioCapture.user_message(),
            "Microphone error. Check permissions."
        );
        assert_eq!(
            VoiceError::NotAllowed.user_message(),
            "Mic access denied. Please allow."
        );
    }

    #[test]
    fn test_unknown_code_keeps_generic_shape() {
        assert_eq!(
            VoiceError::Failed("network".into()).user_message(),
            "Error: network"
        );
    }
}
