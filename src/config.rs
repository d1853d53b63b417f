use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub greeting: GreetingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct ChatConfig {
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Label used for the local user in the transcript log.
    pub user_name: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct CaptureConfig {
    /// When false, the mood loop never starts and the client behaves as if
    /// no camera were attached.
    #[serde(default = "default_capture_enabled")]
    pub enabled: bool,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Delay before the first capture after the camera comes up.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    #[serde(default = "default_quality")]
    pub jpeg_quality: u8,
    /// Image file to use as the frame source on hosts without a camera.
    pub source: Option<PathBuf>,
}

#[derive(Deserialize, Clone)]
pub struct VoiceConfig {
    #[serde(default = "default_voice_enabled")]
    pub enabled: bool,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Deserialize, Clone)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_enabled")]
    pub enabled: bool,
}

#[derive(Deserialize, Clone)]
pub struct GreetingConfig {
    /// Delay before the proactive greeting when the camera came up.
    #[serde(default = "default_greeting_delay_ms")]
    pub delay_ms: u64,
    /// Shorter delay used when camera setup failed.
    #[serde(default = "default_camera_error_delay_ms")]
    pub camera_error_delay_ms: u64,
}

#[derive(Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,
    /// Override log directory. Default: "logs/" next to the executable.
    pub directory: Option<String>,
}

fn default_base_url() -> String { "http://127.0.0.1:5000".into() }
fn default_timeout_secs() -> u64 { 30 }
fn default_bot_name() -> String { "Aura".into() }
fn default_capture_enabled() -> bool { true }
fn default_interval_ms() -> u64 { 5000 }
fn default_initial_delay_ms() -> u64 { 1000 }
fn default_max_width() -> u32 { 640 }
fn default_quality() -> u8 { 70 }
fn default_voice_enabled() -> bool { true }
fn default_language() -> String { "en-US".into() }
fn default_speech_enabled() -> bool { true }
fn default_greeting_delay_ms() -> u64 { 2500 }
fn default_camera_error_delay_ms() -> u64 { 1500 }
fn default_logging_enabled() -> bool { true }

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            user_name: None,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enabled: default_capture_enabled(),
            interval_ms: default_interval_ms(),
            initial_delay_ms: default_initial_delay_ms(),
            max_width: default_max_width(),
            jpeg_quality: default_quality(),
            source: None,
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: default_voice_enabled(),
            language: default_language(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self { enabled: default_speech_enabled() }
    }
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_greeting_delay_ms(),
            camera_error_delay_ms: default_camera_error_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            directory: None,
        }
    }
}

/// Directory the executable lives in. Config and prefs sit next to it.
pub fn exe_directory() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
}

/// Load config.toml from `cli_path` or next to the executable.
/// A missing or unparsable file degrades to defaults.
pub fn load_config(cli_path: Option<&Path>) -> Config {
    let config_path = match cli_path {
        Some(p) => p.to_path_buf(),
        None => {
            let Some(dir) = exe_directory() else {
                eprintln!("[aura] Could not determine executable directory, using defaults");
                return Config::default();
            };
            dir.join("config.toml")
        }
    };

    match std::fs::read_to_string(&config_path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[aura] Failed to parse {}: {e}", config_path.display());
                Config::default()
            }
        },
        Err(_) => {
            eprintln!(
                "[aura] config.toml not found at {}, using defaults",
                config_path.display()
            );
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.chat.bot_name, "Aura");
        assert!(config.capture.enabled);
        assert_eq!(config.capture.interval_ms, 5000);
        assert_eq!(config.capture.initial_delay_ms, 1000);
        assert_eq!(config.greeting.delay_ms, 2500);
        assert_eq!(config.greeting.camera_error_delay_ms, 1500);
        assert!(config.logging.enabled);
    }

    #[test]
    fn test_partial_file_keeps_section_defaults() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            base_url = "https://aura.example.com"

            [capture]
            interval_ms = 10000
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.base_url, "https://aura.example.com");
        // Unset fields in a present section still default.
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.capture.interval_ms, 10000);
        assert_eq!(config.capture.jpeg_quality, 70);
        // Absent sections default wholesale.
        assert_eq!(config.chat.bot_name, "Aura");
        assert!(config.speech.enabled);
    }

    #[test]
    fn test_garbage_section_fails_parse() {
        let result: Result<Config, _> = toml::from_str("[capture]\ninterval_ms = \"soon\"");
        assert!(result.is_err());
    }
}
