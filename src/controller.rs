use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::actions::{BotAction, NOW_PLAYING_CAPTION};
use crate::api::{ActionPayload, BackendClient, ChatReply};
use crate::capture::{self, FrameSource};
use crate::config::Config;
use crate::events::{EventSender, UiEvent};
use crate::logging::SessionLog;
use crate::mood;
use crate::speech::SpeechSynthesizer;
use crate::state::{MessageRole, SessionState};
use crate::voice::{VoiceRecognizer, VOICE_IDLE_STATUS, VOICE_UNSUPPORTED_STATUS};

/// Fallback reply when an explicit send fails.
const SEND_FALLBACK: &str = "Sorry, I'm having trouble connecting. Please try again.";
/// Fallback reply when the proactive greeting fails.
const GREETING_FALLBACK: &str = "Hi there! I had a little trouble starting. How can I help?";
/// Bot message shown in chat when camera setup fails.
const CAMERA_FALLBACK_MESSAGE: &str =
    "I can't access your camera for mood detection. We can still chat!";

/// The session controller. Owns all mutable session state, talks to the
/// backend, and narrates everything to the surface through `UiEvent`s.
///
/// Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct ChatController {
    inner: Arc<Inner>,
}

struct Inner {
    config: Config,
    backend: BackendClient,
    synth: Box<dyn SpeechSynthesizer>,
    state: Mutex<SessionState>,
    events: EventSender,
    transcript: SessionLog,
}

impl ChatController {
    pub fn new(
        config: Config,
        events: EventSender,
        synth: Box<dyn SpeechSynthesizer>,
        transcript: SessionLog,
    ) -> Self {
        let backend = BackendClient::new(&config.backend);
        Self {
            inner: Arc::new(Inner {
                config,
                backend,
                synth,
                state: Mutex::new(SessionState::new()),
                events,
                transcript,
            }),
        }
    }

    pub fn current_mood(&self) -> String {
        self.inner.state.lock().current_mood.clone()
    }

    fn emit(&self, event: UiEvent) {
        // A closed receiver just means there is no surface left to draw for.
        let _ = self.inner.events.send(event);
    }

    // --- Session startup ---

    /// Wire the camera outcome into the session. On success the capture loop
    /// and the delayed greeting start; on failure the user is told chat still
    /// works and the greeting fires sooner.
    pub fn setup_camera(&self, camera: Result<Box<dyn FrameSource>, String>) {
        match camera {
            Ok(source) => {
                info!("camera ready, starting capture loop");
                self.spawn_capture_loop(source);
                self.spawn_greeting(self.inner.config.greeting.delay_ms);
            }
            Err(err) => {
                warn!("camera unavailable: {err}");
                self.emit(UiEvent::MoodUnavailable { label: "Camera Error".into() });
                self.emit(UiEvent::MessageAppended {
                    role: MessageRole::Bot,
                    text: CAMERA_FALLBACK_MESSAGE.into(),
                });
                self.spawn_greeting(self.inner.config.greeting.camera_error_delay_ms);
            }
        }
    }

    fn spawn_capture_loop(&self, mut source: Box<dyn FrameSource>) {
        let controller = self.clone();
        let initial = Duration::from_millis(self.inner.config.capture.initial_delay_ms);
        let every = Duration::from_millis(self.inner.config.capture.interval_ms.max(1));
        tokio::spawn(async move {
            tokio::time::sleep(initial).await;
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick fires immediately: one capture right after the
                // initial delay, then the fixed interval.
                ticker.tick().await;
                controller.capture_tick(source.as_mut()).await;
            }
        });
    }

    fn spawn_greeting(&self, delay_ms: u64) {
        let controller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            controller.send_proactive_greeting().await;
        });
    }

    // --- Mood capture ---

    /// One tick of the mood loop: grab, encode, post, update the badge.
    /// Every failure degrades to a badge placeholder; the loop never stops.
    pub async fn capture_tick(&self, source: &mut dyn FrameSource) {
        let Some(frame) = source.grab().await else {
            return;
        };

        let cap = &self.inner.config.capture;
        let Some(data_url) = capture::encode_frame(&frame, cap.jpeg_quality, cap.max_width) else {
            debug!("frame encode failed, skipping tick");
            return;
        };

        match self.inner.backend.analyze_frame(&data_url).await {
            Ok(analysis) => {
                if let Some(detected) = analysis.mood.filter(|m| !m.is_empty()) {
                    self.inner.state.lock().current_mood = detected.clone();
                    self.emit(UiEvent::MoodChanged {
                        label: mood::display_label(&detected),
                        color: mood::badge_color(&detected),
                    });
                } else if let Some(error) = analysis.error {
                    warn!(
                        "mood analysis server error: {error}{}",
                        analysis
                            .error_detail
                            .map(|d| format!(" ({d})"))
                            .unwrap_or_default()
                    );
                    self.emit(UiEvent::MoodUnavailable { label: "Error".into() });
                }
            }
            Err(err) => {
                warn!("frame upload failed: {err}");
                self.emit(UiEvent::MoodUnavailable { label: "Network Error".into() });
            }
        }
    }

    // --- Chat exchange ---

    /// Explicit send path. Whitespace-only input is rejected before anything
    /// is echoed or sent.
    pub async fn send_message(&self, input: &str) {
        let text = input.trim();
        if text.is_empty() {
            return;
        }

        self.emit(UiEvent::MessageAppended {
            role: MessageRole::User,
            text: text.to_string(),
        });
        self.show_thinking();

        let mood = self.current_mood();
        match self.inner.backend.send_chat(text, &mood).await {
            Ok(reply) => self.apply_reply(text, reply),
            Err(err) => {
                warn!("chat request failed: {err}");
                self.resolve_thinking(Some(SEND_FALLBACK));
            }
        }
    }

    /// Greeting path: one empty-message exchange, at most once per session.
    pub async fn send_proactive_greeting(&self) {
        {
            let mut state = self.inner.state.lock();
            if state.greeting_sent {
                return;
            }
            state.greeting_sent = true;
        }

        self.show_thinking();
        let mood = self.current_mood();
        match self.inner.backend.send_chat("", &mood).await {
            Ok(reply) => {
                let transcript_label = format!("({mood} detected - proactive)");
                self.apply_reply(&transcript_label, reply);
            }
            Err(err) => {
                warn!("proactive greeting failed: {err}");
                self.resolve_thinking(Some(GREETING_FALLBACK));
            }
        }
    }

    /// Shared tail of both request paths: resolve the placeholder, speak,
    /// dispatch any action.
    fn apply_reply(&self, user_msg: &str, reply: ChatReply) {
        if reply.reply.is_empty() {
            self.resolve_thinking(None);
        } else {
            self.resolve_thinking(Some(&reply.reply));
            self.speak(reply.reply.clone());
            self.inner.transcript.record_exchange(user_msg, &reply.reply);
        }
        self.dispatch_action(reply.action.as_deref(), reply.action_payload.as_ref());
    }

    // --- Thinking placeholder ---

    /// Show the placeholder unless one is already live. At most one exists
    /// at a time regardless of how many requests are in flight.
    fn show_thinking(&self) {
        let id = {
            let mut state = self.inner.state.lock();
            if state.thinking.is_some() {
                return;
            }
            let id = state.next_entry_id();
            state.thinking = Some(id);
            id
        };
        self.emit(UiEvent::ThinkingStarted { id });
    }

    /// Consume the placeholder: replace it with `reply`, or remove it when
    /// there is nothing to show. If a concurrent exchange already consumed
    /// it, the reply lands as a fresh entry instead.
    fn resolve_thinking(&self, reply: Option<&str>) {
        let taken = self.inner.state.lock().thinking.take();
        match (taken, reply) {
            (Some(id), Some(text)) => self.emit(UiEvent::ThinkingResolved {
                id,
                text: text.to_string(),
            }),
            (Some(id), None) => self.emit(UiEvent::ThinkingRemoved { id }),
            (None, Some(text)) => self.emit(UiEvent::MessageAppended {
                role: MessageRole::Bot,
                text: text.to_string(),
            }),
            (None, None) => {}
        }
    }

    // --- Speech output ---

    /// Speak a reply unless the synthesizer is missing or already busy.
    /// Busy means drop, not queue.
    fn speak(&self, text: String) {
        if !self.inner.config.speech.enabled || !self.inner.synth.is_available() {
            return;
        }
        {
            let mut state = self.inner.state.lock();
            if state.is_bot_speaking {
                debug!("speech busy, dropping utterance");
                return;
            }
            state.is_bot_speaking = true;
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            if let Err(err) = inner.synth.speak(&text).await {
                warn!("speech synthesis failed: {err}");
            }
            inner.state.lock().is_bot_speaking = false;
        });
    }

    // --- Voice input ---

    /// Run one recognition session: listen, then send the transcript as a
    /// regular message. Returns immediately when the recognizer is
    /// unavailable or a session is already running.
    pub async fn run_voice_session(&self, recognizer: &mut dyn VoiceRecognizer) {
        if !self.inner.config.voice.enabled || !recognizer.is_available() {
            self.emit(UiEvent::VoiceStatus { text: VOICE_UNSUPPORTED_STATUS.into() });
            return;
        }
        {
            let mut state = self.inner.state.lock();
            if state.is_recognizing {
                return;
            }
            state.is_recognizing = true;
        }
        self.emit(UiEvent::VoiceStateChanged { listening: true });
        self.emit(UiEvent::VoiceStatus { text: "Listening...".into() });

        let outcome = recognizer.listen().await;

        self.inner.state.lock().is_recognizing = false;
        self.emit(UiEvent::VoiceStateChanged { listening: false });

        match outcome {
            Ok(Some(transcript)) => {
                self.emit(UiEvent::VoiceStatus { text: VOICE_IDLE_STATUS.into() });
                self.send_message(&transcript).await;
            }
            Ok(None) => {
                self.emit(UiEvent::VoiceStatus { text: VOICE_IDLE_STATUS.into() });
            }
            Err(err) => {
                warn!("speech recognition error: {err:?}");
                self.emit(UiEvent::VoiceStatus { text: err.user_message() });
            }
        }
    }

    // --- Action dispatch ---

    /// Reset the media surface, then apply the directive if it parsed.
    fn dispatch_action(&self, action: Option<&str>, payload: Option<&ActionPayload>) {
        self.emit(UiEvent::MediaCleared);

        match BotAction::from_wire(action, payload) {
            Some(BotAction::PlaySong { url }) => {
                self.emit(UiEvent::SongStarted { url, caption: NOW_PLAYING_CAPTION.into() });
            }
            Some(BotAction::SuggestActivity { text }) => {
                self.emit(UiEvent::ActivitySuggested { text });
            }
            None => {}
        }
    }
}
