use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use aura_companion::capture::{FrameSource, StillImageSource};
use aura_companion::config::{self, Config};
use aura_companion::controller::ChatController;
use aura_companion::events::{self, EventReceiver, UiEvent};
use aura_companion::logging::{self, SessionLog};
use aura_companion::mood::BadgeColor;
use aura_companion::prefs::Preferences;
use aura_companion::speech::SilentSynthesizer;
use aura_companion::state::MessageRole;
use aura_companion::voice::UnsupportedRecognizer;

#[derive(Parser)]
#[command(name = "aura", about = "Aura companion -- terminal chat client")]
struct Cli {
    /// Path to config.toml (defaults to config.toml next to this exe)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config)
    #[arg(short, long)]
    backend: Option<String>,

    /// Image file to use as the camera frame source
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Run without a camera (chat only)
    #[arg(long)]
    no_camera: bool,

    /// Name used for you in the session transcript
    #[arg(short, long)]
    user: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config(cli.config.as_deref());
    if let Some(backend) = cli.backend.clone() {
        config.backend.base_url = backend;
    }
    if let Some(user) = cli.user.clone() {
        config.chat.user_name = Some(user);
    }

    logging::init_tracing(&config.logging);

    let prefs_dir = config::exe_directory().context("could not determine executable directory")?;
    let mut prefs = Preferences::load(&prefs_dir);
    let dark_mode = Arc::new(AtomicBool::new(prefs.dark_mode));

    print_banner(&config, prefs.dark_mode);

    let (tx, rx) = events::channel();
    let transcript = SessionLog::create(&config.logging, config.chat.user_name.as_deref());
    let controller = ChatController::new(config.clone(), tx, Box::new(SilentSynthesizer), transcript);

    controller.setup_camera(make_frame_source(&cli, &config));

    let bot_name = config.chat.bot_name.clone();
    tokio::spawn(render_events(rx, bot_name, Arc::clone(&dark_mode)));

    // Input loop. Sends are spawned so slow responses never block typing;
    // each in-flight request resolves independently.
    let mut recognizer = UnsupportedRecognizer;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        match line.trim() {
            "/quit" => break,
            "/dark" => {
                let enabled = prefs.toggle_dark_mode(&prefs_dir);
                dark_mode.store(enabled, Ordering::Relaxed);
                println!("{}", if enabled { "\u{2600} dark mode on" } else { "\u{1F319} dark mode off" });
            }
            "/voice" => controller.run_voice_session(&mut recognizer).await,
            _ => {
                let controller = controller.clone();
                let text = line.clone();
                tokio::spawn(async move {
                    controller.send_message(&text).await;
                });
            }
        }
    }

    Ok(())
}

fn print_banner(config: &Config, dark_mode: bool) {
    println!("Aura Companion -- backend {}", config.backend.base_url);
    println!("Type a message, /voice to talk, /dark to toggle theme, /quit to leave.");
    if dark_mode {
        println!("\u{2600} dark mode on");
    }
    println!("(c) {} Aura Companion", Local::now().year());
}

fn make_frame_source(cli: &Cli, config: &Config) -> Result<Box<dyn FrameSource>, String> {
    if cli.no_camera || !config.capture.enabled {
        return Err("frame capture disabled".into());
    }
    match cli.frames.clone().or_else(|| config.capture.source.clone()) {
        Some(path) => Ok(Box::new(StillImageSource::new(path))),
        None => Err("no camera device available on this host".into()),
    }
}

/// Draw loop: everything the controller reports lands here.
async fn render_events(mut rx: EventReceiver, bot_name: String, dark_mode: Arc<AtomicBool>) {
    while let Some(event) = rx.recv().await {
        match event {
            UiEvent::MessageAppended { role, text } => match role {
                MessageRole::User => println!("You: {text}"),
                MessageRole::Bot => println!("{bot_name}: {text}"),
            },
            UiEvent::ThinkingStarted { .. } => println!("{bot_name} is thinking..."),
            UiEvent::ThinkingResolved { text, .. } => println!("{bot_name}: {text}"),
            UiEvent::ThinkingRemoved { .. } => {}
            UiEvent::MoodChanged { label, color } => {
                let code = badge_ansi(color, dark_mode.load(Ordering::Relaxed));
                println!("[mood] \x1b[{code}m{label}\x1b[0m");
            }
            UiEvent::MoodUnavailable { label } => {
                println!("[mood] \x1b[31m{label}\x1b[0m");
            }
            UiEvent::VoiceStateChanged { listening } => {
                if listening {
                    println!("[voice] \u{1F534} recording");
                }
            }
            UiEvent::VoiceStatus { text } => println!("[voice] {text}"),
            UiEvent::MediaCleared => {}
            UiEvent::SongStarted { url, caption } => println!("[player] {caption} ({url})"),
            UiEvent::ActivitySuggested { text } => println!("[suggestion] {text}"),
        }
    }
}

fn badge_ansi(color: BadgeColor, dark_mode: bool) -> &'static str {
    // Bright variants read better on the dark palette.
    match (color, dark_mode) {
        (BadgeColor::Success, false) => "32",
        (BadgeColor::Success, true) => "92",
        (BadgeColor::Info, false) => "36",
        (BadgeColor::Info, true) => "96",
        (BadgeColor::Danger, false) => "31",
        (BadgeColor::Danger, true) => "91",
        (BadgeColor::Warning, false) => "33",
        (BadgeColor::Warning, true) => "93",
        (BadgeColor::Secondary, false) => "37",
        (BadgeColor::Secondary, true) => "97",
        (BadgeColor::Primary, false) => "34",
        (BadgeColor::Primary, true) => "94",
    }
}
