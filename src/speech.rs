use async_trait::async_trait;

/// Text-to-speech seam. `speak` resolves when the utterance finishes (or
/// fails); the controller owns the busy flag that serializes utterances.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    async fn speak(&self, text: &str) -> Result<(), String>;
}

/// Placeholder for hosts without a text-to-speech integration. Replies are
/// shown but never spoken.
pub struct SilentSynthesizer;

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn speak(&self, _text: &str) -> Result<(), String> {
        Ok(())
    }
}
