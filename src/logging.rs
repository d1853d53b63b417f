use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use crate::config::{self, LoggingConfig};

/// Set up tracing-subscriber to write to companion.log in the log directory.
pub fn init_tracing(config: &LoggingConfig) {
    if !config.enabled {
        return;
    }
    let Some(dir) = log_directory(config) else { return };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let file_appender = tracing_appender::rolling::never(dir, "companion.log");
    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn log_directory(config: &LoggingConfig) -> Option<PathBuf> {
    if let Some(ref custom) = config.directory {
        return Some(PathBuf::from(custom));
    }
    config::exe_directory().map(|d| d.join("logs"))
}

/// Plain-text transcript of one chat session. Opened lazily at creation,
/// appended after each successful exchange. Every write is best-effort;
/// transcript failures never fail an exchange.
pub struct SessionLog {
    path: Option<PathBuf>,
}

impl SessionLog {
    /// Create the transcript file with a header. Disabled logging or any
    /// filesystem failure yields a no-op log.
    pub fn create(config: &LoggingConfig, user_label: Option<&str>) -> Self {
        Self { path: Self::open(config, user_label) }
    }

    /// A transcript that records nothing.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    fn open(config: &LoggingConfig, user_label: Option<&str>) -> Option<PathBuf> {
        if !config.enabled {
            return None;
        }

        let dir = log_directory(config)?;
        fs::create_dir_all(&dir).ok()?;

        let user_slug = user_label
            .unwrap_or("session")
            .replace(' ', "-")
            .replace(|c: char| !c.is_alphanumeric() && c != '-', "");

        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let filename = format!("{user_slug}_{timestamp}.txt");
        let path = dir.join(filename);

        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&path)
            .ok()?;

        let header = format!(
            "=== Aura Companion - Session Transcript ===\nUser: {}\nDate: {}\n===========================================\n\n",
            user_label.unwrap_or("(unnamed)"),
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        file.write_all(header.as_bytes()).ok()?;

        Some(path)
    }

    /// Append a user+bot message pair after a successful exchange.
    pub fn record_exchange(&self, user_msg: &str, bot_msg: &str) {
        let Some(ref path) = self.path else { return };

        let mut file = match OpenOptions::new().append(true).open(path) {
            Ok(f) => f,
            Err(_) => return,
        };

        let now = Local::now().format("%H:%M:%S");
        let entry = format!("[{now}] You:\n{user_msg}\n\n[{now}] Aura:\n{bot_msg}\n\n");
        let _ = file.write_all(entry.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;

    fn temp_logging(tag: &str) -> LoggingConfig {
        let dir = std::env::temp_dir().join(format!("aura-log-{tag}-{}", std::process::id()));
        LoggingConfig {
            enabled: true,
            directory: Some(dir.to_string_lossy().into_owned()),
        }
    }

    #[test]
    fn test_transcript_header_and_exchanges() {
        let config = temp_logging("exchange");
        let log = SessionLog::create(&config, Some("Sam Doe"));
        log.record_exchange("hello", "Hi Sam!");

        let path = log.path.as_ref().expect("transcript file created");
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("Sam-Doe_"));

        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("=== Aura Companion - Session Transcript ==="));
        assert!(contents.contains("hello"));
        assert!(contents.contains("Hi Sam!"));
    }

    #[test]
    fn test_disabled_log_records_nothing() {
        let config = LoggingConfig { enabled: false, directory: None };
        let log = SessionLog::create(&config, None);
        assert!(log.path.is_none());
        // Must not panic.
        log.record_exchange("a", "b");
    }
}
