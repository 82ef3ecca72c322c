//! Recording session orchestration
//!
//! Drives repeated record -> transcribe -> emit cycles over one backend
//! instance. The loop runs until Ctrl+C (handled at the binary level as a
//! clean exit), stdin EOF at the session prompt, or after a single cycle
//! in single-shot mode. An empty recording restarts the cycle instead of
//! reaching the backend; capture and transcription failures are fatal to
//! the whole run.

use crate::audio::AudioCapture;
use crate::error::{Result, VibevoxError};
use crate::output::Emitter;
use crate::transcribe::Transcriber;
use std::io::BufRead;

/// Run configuration for the session loop
pub struct SessionOptions {
    /// Exit after one full cycle
    pub once: bool,
    /// Suppress prompts and banners
    pub quiet: bool,
    /// Forced language code, or None for auto-detection
    pub language: Option<String>,
    /// Request word-level timestamps from the backend
    pub word_timestamps: bool,
}

/// The record/transcribe/emit loop
pub struct SessionLoop {
    capture: Box<dyn AudioCapture>,
    backend: Box<dyn Transcriber>,
    emitter: Emitter,
    options: SessionOptions,
}

impl SessionLoop {
    pub fn new(
        capture: Box<dyn AudioCapture>,
        backend: Box<dyn Transcriber>,
        emitter: Emitter,
        options: SessionOptions,
    ) -> Self {
        Self {
            capture,
            backend,
            emitter,
            options,
        }
    }

    /// Run sessions until exit. Returns Ok on clean completion
    /// (single-shot done, or stdin closed at the session prompt).
    pub fn run(&mut self) -> Result<()> {
        let mut session = 0u32;

        loop {
            session += 1;

            if !self.options.quiet {
                let extra = if self.options.once {
                    ""
                } else {
                    " (Ctrl+C to quit)"
                };
                println!("[Session {}] Press Enter to start recording{}...", session, extra);

                if !await_start()? {
                    // stdin closed; nothing more to record
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }

            let audio = self.capture.record(self.options.quiet)?;

            if audio.is_empty() {
                if !self.options.quiet {
                    println!("No audio recorded. Try again.\n");
                }
                if self.options.once {
                    return Err(VibevoxError::EmptyRecording);
                }
                continue;
            }

            if !self.options.quiet {
                println!("Transcribing...");
            }

            let result = self.backend.transcribe(
                &audio,
                self.options.language.as_deref(),
                self.options.word_timestamps,
            )?;

            self.emitter.emit(&result, audio.duration())?;

            if self.options.once {
                return Ok(());
            }
        }
    }
}

/// Wait for Enter; false means stdin reached EOF.
fn await_start() -> std::io::Result<bool> {
    let mut line = String::new();
    let bytes = std::io::stdin().lock().read_line(&mut line)?;
    Ok(bytes > 0)
}
