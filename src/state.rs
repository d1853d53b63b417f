/// Mood assumed until the first successful frame analysis.
pub const DEFAULT_MOOD: &str = "neutral";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Bot,
}

/// All mutable session state, owned by the controller behind one mutex.
/// Reset on session teardown; nothing here survives a restart.
pub struct SessionState {
    /// Latest mood label from the analysis endpoint; read on every chat send.
    pub current_mood: String,
    pub is_recognizing: bool,
    /// While true, new speech requests are dropped, not queued.
    pub is_bot_speaking: bool,
    /// Entry id of the live "thinking" placeholder, if any. At most one
    /// exists at a time; whichever response arrives while it is set
    /// consumes it.
    pub thinking: Option<u64>,
    /// Set at the first greeting attempt so it can never fire twice.
    pub greeting_sent: bool,
    next_entry_id: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            current_mood: DEFAULT_MOOD.to_string(),
            is_recognizing: false,
            is_bot_speaking: false,
            thinking: None,
            greeting_sent: false,
            next_entry_id: 0,
        }
    }

    pub fn next_entry_id(&mut self) -> u64 {
        self.next_entry_id += 1;
        self.next_entry_id
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
