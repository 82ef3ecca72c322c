//! Vibevox: local voice transcription for the terminal
//!
//! This library provides the core functionality for:
//! - Capturing microphone audio via cpal (CoreAudio, PipeWire, PulseAudio, ALSA)
//! - Transcribing speech locally with whisper.cpp (whisper-rs)
//! - Selecting an accelerated backend when the host supports it
//! - Formatting results for the terminal, a transcript file, or the clipboard
//!
//! # Architecture
//!
//! ```text
//!   ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//!   │    Audio     │      │  Transcribe  │      │    Output    │
//!   │    (cpal)    │ ───▶ │ (whisper-rs) │ ───▶ │ stdout/file/ │
//!   │              │ f32  │              │ text │  clipboard   │
//!   └──────────────┘ 16k  └──────────────┘      └──────────────┘
//!          ▲                     ▲
//!          │                     │
//!   ┌─────────────────────────────────────┐
//!   │            Session loop             │
//!   │  Enter ─▶ record ─▶ Enter ─▶ emit   │
//!   └─────────────────────────────────────┘
//! ```
//!
//! The session loop owns one capture handle and one backend for its whole
//! lifetime; the model is loaded once before the first session.

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod transcribe;

pub use cli::Cli;
pub use config::Config;
pub use error::{Result, VibevoxError};
pub use session::{SessionLoop, SessionOptions};
