use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;

// --- Wire structs, mirroring the backend's JSON contract ---

#[derive(Serialize)]
struct FrameRequest<'a> {
    image: &'a str,
}

/// `/process_video` response. The backend reports soft failures in-band:
/// a body with `error` set (and no usable mood) still comes back 200.
#[derive(Deserialize)]
pub struct MoodAnalysis {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_detail: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    mood: &'a str,
}

#[derive(Deserialize)]
pub struct ChatReply {
    /// Missing reply deserializes to empty, which removes the thinking
    /// placeholder without appending a message.
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub action_payload: Option<ActionPayload>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPayload {
    #[serde(default)]
    pub song_url: Option<String>,
    #[serde(default)]
    pub activity_text: Option<String>,
}

// --- Client ---

/// HTTP client for the two backend endpoints. Errors are the user-facing
/// message for the failure; callers log them and degrade.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST a data-URL encoded JPEG frame for mood analysis.
    pub async fn analyze_frame(&self, image_data_url: &str) -> Result<MoodAnalysis, String> {
        let response = self
            .http
            .post(format!("{}/process_video", self.base_url))
            .json(&FrameRequest { image: image_data_url })
            .send()
            .await
            .map_err(transport_message)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_message(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|_| "Unexpected analysis response.".to_string())
    }

    /// POST a chat message (possibly empty, for the proactive greeting)
    /// together with the current mood.
    pub async fn send_chat(&self, message: &str, mood: &str) -> Result<ChatReply, String> {
        let response = self
            .http
            .post(format!("{}/chat_message", self.base_url))
            .json(&ChatRequest { message, mood })
            .send()
            .await
            .map_err(transport_message)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_message(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|_| "Unexpected chat response.".to_string())
    }
}

fn transport_message(e: reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timed out. Try again.".to_string()
    } else {
        format!("Network error: {e}")
    }
}

fn status_message(code: u16) -> String {
    match code {
        401 => "Not authenticated.".into(),
        400 => "Bad request.".into(),
        429 => "Rate limited. Try again shortly.".into(),
        500 | 503 => "Backend server error. Try again.".into(),
        code => format!("Backend error (HTTP {code})."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_reply_full_payload() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"reply": "Here you go!", "action": "play_song",
                "action_payload": {"song_url": "x.mp3"}}"#,
        )
        .unwrap();
        assert_eq!(reply.reply, "Here you go!");
        assert_eq!(reply.action.as_deref(), Some("play_song"));
        assert_eq!(
            reply.action_payload.unwrap().song_url.as_deref(),
            Some("x.mp3")
        );
    }

    #[test]
    fn test_chat_reply_minimal_payload() {
        let reply: ChatReply = serde_json::from_str(r#"{"reply": "Hello."}"#).unwrap();
        assert!(reply.action.is_none());
        assert!(reply.action_payload.is_none());
    }

    #[test]
    fn test_chat_reply_missing_reply_is_empty() {
        let reply: ChatReply = serde_json::from_str(r#"{"error_detail": "model down"}"#).unwrap();
        assert!(reply.reply.is_empty());
    }

    #[test]
    fn test_mood_analysis_error_body() {
        let analysis: MoodAnalysis =
            serde_json::from_str(r#"{"error": "No image data"}"#).unwrap();
        assert!(analysis.mood.is_none());
        assert_eq!(analysis.error.as_deref(), Some("No image data"));
    }

    #[test]
    fn test_frame_request_field_name() {
        let body = serde_json::to_value(FrameRequest { image: "data:image/jpeg;base64,AA==" })
            .unwrap();
        assert_eq!(body["image"], "data:image/jpeg;base64,AA==");
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(status_message(401), "Not authenticated.");
        assert_eq!(status_message(502), "Backend error (HTTP 502).");
    }
}
