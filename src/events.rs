use tokio::sync::mpsc;

use crate::mood::BadgeColor;
use crate::state::MessageRole;

/// Everything the controller tells the rendering surface. The surface never
/// reaches into session state; it draws what it is sent.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    MessageAppended {
        role: MessageRole,
        text: String,
    },
    /// A "thinking" placeholder entry appeared while a request is in flight.
    ThinkingStarted {
        id: u64,
    },
    /// The placeholder entry becomes the reply text.
    ThinkingResolved {
        id: u64,
        text: String,
    },
    /// The placeholder entry is removed without a replacement.
    ThinkingRemoved {
        id: u64,
    },
    MoodChanged {
        label: String,
        color: BadgeColor,
    },
    /// The mood badge shows an error placeholder ("Error", "Network Error",
    /// "Camera Error") but the session continues.
    MoodUnavailable {
        label: String,
    },
    VoiceStateChanged {
        listening: bool,
    },
    VoiceStatus {
        text: String,
    },
    /// Stop playback, clear the player source, hide the suggestion panel.
    /// Sent before every action application.
    MediaCleared,
    SongStarted {
        url: String,
        caption: String,
    },
    ActivitySuggested {
        text: String,
    },
}

pub type EventSender = mpsc::UnboundedSender<UiEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<UiEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
