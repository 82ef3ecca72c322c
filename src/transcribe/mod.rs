//! Speech-to-text transcription module
//!
//! Provides transcription via whisper.cpp (whisper-rs crate) with two
//! variants: a Metal-accelerated backend for Apple Silicon and a
//! cross-platform CPU backend. The variant is chosen once per process by
//! [`select_backend`]; callers only see the [`Transcriber`] contract.

pub mod metal;
pub mod model;
pub mod whisper;

use crate::audio::AudioBuffer;
use crate::error::TranscribeError;
use std::fmt;
use std::str::FromStr;

/// Whisper model sizes known to vibevox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
    LargeV2,
    LargeV3,
}

impl ModelSize {
    /// ggml file name for this size, as published in the whisper.cpp repo
    pub fn ggml_filename(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "ggml-tiny.bin",
            ModelSize::Base => "ggml-base.bin",
            ModelSize::Small => "ggml-small.bin",
            ModelSize::Medium => "ggml-medium.bin",
            // "large" is an alias for the latest large checkpoint
            ModelSize::Large | ModelSize::LargeV3 => "ggml-large-v3.bin",
            ModelSize::LargeV2 => "ggml-large-v2.bin",
        }
    }

    /// Approximate download size, for the confirmation prompt
    pub fn size_mb(&self) -> u32 {
        match self {
            ModelSize::Tiny => 75,
            ModelSize::Base => 142,
            ModelSize::Small => 466,
            ModelSize::Medium => 1500,
            ModelSize::Large | ModelSize::LargeV2 | ModelSize::LargeV3 => 3100,
        }
    }
}

impl FromStr for ModelSize {
    type Err = TranscribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiny" => Ok(ModelSize::Tiny),
            "base" => Ok(ModelSize::Base),
            "small" => Ok(ModelSize::Small),
            "medium" => Ok(ModelSize::Medium),
            "large" => Ok(ModelSize::Large),
            "large-v2" => Ok(ModelSize::LargeV2),
            "large-v3" => Ok(ModelSize::LargeV3),
            other => Err(TranscribeError::UnknownModel(other.to_string())),
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
            ModelSize::LargeV2 => "large-v2",
            ModelSize::LargeV3 => "large-v3",
        };
        f.write_str(name)
    }
}

/// A word-level span within a segment (seconds)
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub start: f64,
    pub end: f64,
    pub word: String,
}

/// A contiguous time-stamped span of transcribed text (seconds)
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    /// Present only when word timestamps were requested and available
    pub words: Option<Vec<Word>>,
}

/// Result of one transcribe call
///
/// `text` is the trimmed concatenation of segment texts in temporal order;
/// segments are ordered non-decreasing by start time as produced by the
/// model. `language` is the forced or detected language code, if known.
#[derive(Debug, Clone, Default)]
pub struct Transcription {
    pub text: String,
    pub segments: Vec<Segment>,
    pub language: Option<String>,
}

/// Trait for speech-to-text implementations
///
/// Exactly one model is loaded at a time per handle; loading again replaces
/// it. Calling `transcribe` before `load_model` is a programming error and
/// fails with [`TranscribeError::ModelNotLoaded`].
pub trait Transcriber: Send {
    /// Load (or replace) the model of the given size
    fn load_model(&mut self, size: ModelSize) -> Result<(), TranscribeError>;

    /// Transcribe a recorded buffer.
    ///
    /// `language` forces decoding in that language; `None` enables automatic
    /// language identification. `word_timestamps` requests word-level spans;
    /// segments where they are unavailable simply omit them.
    fn transcribe(
        &mut self,
        audio: &AudioBuffer,
        language: Option<&str>,
        word_timestamps: bool,
    ) -> Result<Transcription, TranscribeError>;

    /// Stable human-readable name of the active variant, for display
    fn name(&self) -> &'static str;
}

/// Host capabilities relevant to backend selection.
///
/// Kept as plain data so the selection decision is a pure function of the
/// declared capabilities rather than of probing side effects.
#[derive(Debug, Clone, Copy)]
pub struct HostCaps {
    pub os: &'static str,
    pub arch: &'static str,
    /// Whether the binary was built with the `metal` feature
    pub metal_built: bool,
}

impl HostCaps {
    pub fn detect() -> Self {
        Self {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            metal_built: cfg!(feature = "metal"),
        }
    }
}

/// Whether the accelerated variant is a candidate on this host
fn accelerated_candidate(caps: &HostCaps) -> bool {
    caps.os == "macos" && caps.arch == "aarch64" && caps.metal_built
}

/// Select the best available backend for the given host.
///
/// On Apple Silicon with Metal support built in, the accelerated variant is
/// tried first; if it cannot be constructed the CPU backend is used without
/// surfacing an error, since the optional component being absent is an
/// expected condition on many hosts. The CPU backend always constructs.
pub fn select_backend(caps: &HostCaps, threads: Option<usize>) -> Box<dyn Transcriber> {
    if accelerated_candidate(caps) {
        match metal::MetalBackend::new(threads) {
            Ok(backend) => {
                tracing::info!("Using Metal-accelerated whisper backend");
                return Box::new(backend);
            }
            Err(e) => {
                tracing::debug!("Metal backend unavailable ({}), falling back to CPU", e);
            }
        }
    }

    Box::new(whisper::WhisperBackend::new(threads))
}
