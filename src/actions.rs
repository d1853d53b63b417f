use crate::api::ActionPayload;

/// Caption shown next to the player while a backend-chosen song plays.
pub const NOW_PLAYING_CAPTION: &str = "Now playing an uplifting song for you! \u{1F3B6}";

/// A backend-issued directive the client knows how to carry out. Unknown
/// action names and payloads missing their required field parse to `None`,
/// which leaves the media surface in its cleared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotAction {
    PlaySong { url: String },
    SuggestActivity { text: String },
}

impl BotAction {
    pub fn from_wire(action: Option<&str>, payload: Option<&ActionPayload>) -> Option<Self> {
        match action? {
            "play_song" => payload?
                .song_url
                .clone()
                .map(|url| Self::PlaySong { url }),
            "suggest_activity" => payload?
                .activity_text
                .clone()
                .map(|text| Self::SuggestActivity { text }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(song_url: Option<&str>, activity_text: Option<&str>) -> ActionPayload {
        ActionPayload {
            song_url: song_url.map(String::from),
            activity_text: activity_text.map(String::from),
        }
    }

    #[test]
    fn test_play_song_needs_url() {
        let action = BotAction::from_wire(Some("play_song"), Some(&payload(Some("x.mp3"), None)));
        assert_eq!(action, Some(BotAction::PlaySong { url: "x.mp3".into() }));

        assert_eq!(
            BotAction::from_wire(Some("play_song"), Some(&payload(None, None))),
            None
        );
        assert_eq!(BotAction::from_wire(Some("play_song"), None), None);
    }

    #[test]
    fn test_suggest_activity_needs_text() {
        let action = BotAction::from_wire(
            Some("suggest_activity"),
            Some(&payload(None, Some("Take a deep breath."))),
        );
        assert_eq!(
            action,
            Some(BotAction::SuggestActivity { text: "Take a deep breath.".into() })
        );

        assert_eq!(
            BotAction::from_wire(Some("suggest_activity"), Some(&payload(Some("x.mp3"), None))),
            None
        );
    }

    #[test]
    fn test_unknown_or_absent_action_is_none() {
        assert_eq!(
            BotAction::from_wire(Some("dance"), Some(&payload(Some("x.mp3"), None))),
            None
        );
        assert_eq!(BotAction::from_wire(None, Some(&payload(Some("x.mp3"), None))), None);
    }
}
