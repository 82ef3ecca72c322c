//! Error types for vibevox
//!
//! Uses thiserror for ergonomic error definitions with clear messages
//! that guide users toward fixing common issues. Each error kind maps to
//! a documented process exit status so scripted callers can distinguish
//! failure modes (see [`VibevoxError::exit_code`]).

use thiserror::Error;

/// Top-level error type for the vibevox application
#[derive(Error, Debug)]
pub enum VibevoxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio capture error: {0}")]
    Audio(#[from] AudioError),

    #[error("Transcription error: {0}")]
    Transcribe(#[from] TranscribeError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("No audio recorded")]
    EmptyRecording,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VibevoxError {
    /// Process exit status for this error.
    ///
    /// The mapping is contractual:
    /// - 1: generic session failure (output write, empty single-shot recording)
    /// - 3: capture device unavailable
    /// - 4: model load or configuration failure
    /// - 5: transcription failure
    pub fn exit_code(&self) -> i32 {
        match self {
            VibevoxError::Audio(_) => 3,
            VibevoxError::Config(_) => 4,
            VibevoxError::Transcribe(e) => e.exit_code(),
            VibevoxError::Output(_) | VibevoxError::EmptyRecording | VibevoxError::Io(_) => 1,
        }
    }
}

/// Errors related to audio capture
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Could not access microphone: {0}\n  On macOS, check System Settings > Privacy & Security > Microphone.\n  On Linux, check that PipeWire/PulseAudio is running and the device is not busy.")]
    DeviceUnavailable(String),

    #[error("Audio device not found: '{0}'. List devices with: vibevox --list-devices")]
    DeviceNotFound(String),

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Audio stream error: {0}")]
    Stream(String),
}

/// Errors related to speech-to-text transcription
#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("Unknown model size '{0}'. Available: tiny, base, small, medium, large, large-v2, large-v3")]
    UnknownModel(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Model download failed: {0}")]
    DownloadFailed(String),

    #[error("Whisper initialization failed: {0}")]
    InitFailed(String),

    #[error("No model loaded. Call load_model() before transcribe().")]
    ModelNotLoaded,

    #[error("Transcription failed: {0}")]
    InferenceFailed(String),

    #[error("Audio format error: {0}")]
    AudioFormat(String),
}

impl TranscribeError {
    fn exit_code(&self) -> i32 {
        match self {
            TranscribeError::UnknownModel(_)
            | TranscribeError::ModelNotFound(_)
            | TranscribeError::DownloadFailed(_)
            | TranscribeError::InitFailed(_) => 4,
            TranscribeError::ModelNotLoaded
            | TranscribeError::InferenceFailed(_)
            | TranscribeError::AudioFormat(_) => 5,
        }
    }
}

/// Errors related to text output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Error writing to {path}: {source}")]
    FileWrite {
        path: String,
        source: std::io::Error,
    },

    #[error("No clipboard helper found. Install wl-clipboard, xclip, or xsel.")]
    NoClipboardHelper,

    #[error("Clipboard copy failed: {0}")]
    ClipboardFailed(String),
}

/// Result type alias using VibevoxError
pub type Result<T> = std::result::Result<T, VibevoxError>;
