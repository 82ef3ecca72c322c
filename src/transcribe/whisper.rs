//! Whisper-based speech-to-text transcription
//!
//! Uses whisper.cpp via the whisper-rs crate for fast, local transcription.
//! This is the cross-platform default backend; it always constructs and
//! runs on the CPU.

use super::{model, ModelSize, Segment, Transcriber, Transcription, Word};
use crate::audio::AudioBuffer;
use crate::error::TranscribeError;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Whisper transcription backend (CPU)
pub struct WhisperBackend {
    /// Whisper context; present once a model has been loaded
    ctx: Option<WhisperContext>,
    /// Number of threads to use for inference
    threads: i32,
    /// Whether to offload inference to the GPU (used by the Metal variant)
    use_gpu: bool,
}

impl WhisperBackend {
    pub fn new(threads: Option<usize>) -> Self {
        Self::with_gpu(threads, false)
    }

    pub(super) fn with_gpu(threads: Option<usize>, use_gpu: bool) -> Self {
        let threads = threads.unwrap_or_else(|| num_cpus::get().min(4)) as i32;
        Self {
            ctx: None,
            threads,
            use_gpu,
        }
    }
}

impl Transcriber for WhisperBackend {
    fn load_model(&mut self, size: ModelSize) -> Result<(), TranscribeError> {
        let model_path = model::ensure_model(size)?;

        tracing::info!("Loading whisper model from {:?}", model_path);
        let start = std::time::Instant::now();

        let mut ctx_params = WhisperContextParameters::default();
        ctx_params.use_gpu(self.use_gpu);

        let ctx = WhisperContext::new_with_params(
            model_path
                .to_str()
                .ok_or_else(|| TranscribeError::ModelNotFound("invalid model path".to_string()))?,
            ctx_params,
        )
        .map_err(|e| TranscribeError::InitFailed(e.to_string()))?;

        tracing::info!("Model loaded in {:.2}s", start.elapsed().as_secs_f32());

        // Replaces any previously loaded model
        self.ctx = Some(ctx);
        Ok(())
    }

    fn transcribe(
        &mut self,
        audio: &AudioBuffer,
        language: Option<&str>,
        word_timestamps: bool,
    ) -> Result<Transcription, TranscribeError> {
        let ctx = self.ctx.as_ref().ok_or(TranscribeError::ModelNotLoaded)?;

        if audio.is_empty() {
            return Err(TranscribeError::AudioFormat("empty audio buffer".to_string()));
        }

        tracing::debug!(
            "Transcribing {:.2}s of audio ({} samples)",
            audio.duration(),
            audio.len()
        );
        let start = std::time::Instant::now();

        let mut state = ctx
            .create_state()
            .map_err(|e| TranscribeError::InferenceFailed(e.to_string()))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        // None enables automatic language identification
        params.set_language(language);
        params.set_n_threads(self.threads);

        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        // Verbatim decoding: keep blanks and non-speech tokens so
        // disfluencies and exact wording survive into the transcript.
        params.set_suppress_blank(false);
        params.set_suppress_nst(false);

        if word_timestamps {
            // Word-granular segmentation
            params.set_token_timestamps(true);
            params.set_max_len(1);
            params.set_split_on_word(true);
        }

        state
            .full(params, audio.samples())
            .map_err(|e| TranscribeError::InferenceFailed(e.to_string()))?;

        let mut segments = Vec::new();
        let mut text = String::new();

        for segment in state.as_iter() {
            let segment_text = segment
                .to_str()
                .map_err(|e| TranscribeError::InferenceFailed(e.to_string()))?;

            text.push_str(segment_text);

            segments.push(build_segment(
                segment_text,
                segment.start_timestamp(),
                segment.end_timestamp(),
                word_timestamps,
            ));
        }

        let language_code = match language {
            Some(code) => Some(code.to_string()),
            None => whisper_rs::get_lang_str(state.full_lang_id_from_state())
                .map(str::to_string),
        };

        let result = Transcription {
            text: text.trim().to_string(),
            segments,
            language: language_code,
        };

        tracing::info!(
            "Transcription completed in {:.2}s ({} segments)",
            start.elapsed().as_secs_f32(),
            result.segments.len()
        );

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "whisper-cpu"
    }
}

/// Build one result segment from raw model output.
///
/// Text is stripped, but the segment is kept even when blank so segment
/// boundaries stay exactly as the model produced them. Timestamps arrive
/// in centiseconds. In word mode each segment spans exactly one word;
/// blank segments carry no word span.
fn build_segment(raw_text: &str, start_cs: i64, end_cs: i64, word_timestamps: bool) -> Segment {
    let text = raw_text.trim().to_string();
    let start = start_cs as f64 / 100.0;
    let end = end_cs as f64 / 100.0;

    let words = (word_timestamps && !text.is_empty()).then(|| {
        vec![Word {
            start,
            end,
            word: text.clone(),
        }]
    });

    Segment {
        start,
        end,
        text,
        words,
    }
}
