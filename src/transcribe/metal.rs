//! Metal-accelerated whisper backend for Apple Silicon
//!
//! Same inference path as the CPU backend, with the encoder offloaded to
//! the GPU. Only constructible on macOS/aarch64 binaries built with the
//! `metal` feature; everywhere else construction fails and the selector
//! falls back to the CPU backend.

use super::whisper::WhisperBackend;
use super::{ModelSize, Transcriber, Transcription};
use crate::audio::AudioBuffer;
use crate::error::TranscribeError;

/// Metal-accelerated whisper backend
pub struct MetalBackend {
    inner: WhisperBackend,
}

impl MetalBackend {
    pub fn new(threads: Option<usize>) -> Result<Self, TranscribeError> {
        let supported =
            cfg!(all(target_os = "macos", target_arch = "aarch64")) && cfg!(feature = "metal");
        if !supported {
            return Err(TranscribeError::InitFailed(
                "built without Metal support".to_string(),
            ));
        }

        Ok(Self {
            inner: WhisperBackend::with_gpu(threads, true),
        })
    }
}

impl Transcriber for MetalBackend {
    fn load_model(&mut self, size: ModelSize) -> Result<(), TranscribeError> {
        self.inner.load_model(size)
    }

    fn transcribe(
        &mut self,
        audio: &AudioBuffer,
        language: Option<&str>,
        word_timestamps: bool,
    ) -> Result<Transcription, TranscribeError> {
        self.inner.transcribe(audio, language, word_timestamps)
    }

    fn name(&self) -> &'static str {
        "whisper-metal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(all(target_os = "macos", target_arch = "aarch64", feature = "metal")))]
    fn test_unsupported_host_cannot_construct() {
        assert!(MetalBackend::new(None).is_err());
    }
}
