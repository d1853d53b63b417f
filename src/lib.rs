//! Client-session library for the Aura companion backend.
//!
//! The [`controller::ChatController`] mediates between a rendering surface
//! and the backend's two HTTP endpoints: it runs the periodic mood-capture
//! loop, the one-shot proactive greeting, and the chat exchange, and narrates
//! everything through a [`events::UiEvent`] stream. Platform capabilities
//! (camera, speech-to-text, text-to-speech) are trait seams the front-end
//! fills in.

pub mod actions;
pub mod api;
pub mod capture;
pub mod config;
pub mod controller;
pub mod events;
pub mod logging;
pub mod mood;
pub mod prefs;
pub mod speech;
pub mod state;
pub mod voice;
