//! Model file resolution and download
//!
//! ggml model files live under the user data directory
//! (e.g. ~/.local/share/vibevox/models). Missing models are fetched on
//! demand from the whisper.cpp Hugging Face repository using curl, which
//! handles redirects and progress display.

use super::ModelSize;
use crate::config::Config;
use crate::error::TranscribeError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Download URL for a model size
pub fn model_url(size: ModelSize) -> String {
    format!(
        "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/{}",
        size.ggml_filename()
    )
}

/// Resolve the model file for a size, downloading it if missing.
pub fn ensure_model(size: ModelSize) -> Result<PathBuf, TranscribeError> {
    let models_dir = Config::models_dir();
    let model_path = models_dir.join(size.ggml_filename());

    if model_path.exists() {
        return Ok(model_path);
    }

    tracing::info!(
        "Model '{}' not found locally, downloading (~{} MB)",
        size,
        size.size_mb()
    );
    download_model(size, &models_dir, &model_path)?;

    Ok(model_path)
}

fn download_model(
    size: ModelSize,
    models_dir: &Path,
    model_path: &Path,
) -> Result<(), TranscribeError> {
    std::fs::create_dir_all(models_dir)
        .map_err(|e| TranscribeError::DownloadFailed(e.to_string()))?;

    let url = model_url(size);
    eprintln!("Downloading {} model (~{} MB)...", size, size.size_mb());

    // curl writes its progress bar to stderr, keeping stdout clean
    let status = Command::new("curl")
        .args([
            "-L",
            "--progress-bar",
            "--fail",
            "-o",
            model_path.to_str().unwrap_or("model.bin"),
            &url,
        ])
        .status();

    match status {
        Ok(exit_status) if exit_status.success() => {
            tracing::info!("Model saved to {:?}", model_path);
            Ok(())
        }
        Ok(exit_status) => {
            // Clean up partial download
            let _ = std::fs::remove_file(model_path);
            Err(TranscribeError::DownloadFailed(format!(
                "curl exited with code {} fetching {}",
                exit_status.code().unwrap_or(-1),
                url
            )))
        }
        Err(e) => Err(TranscribeError::DownloadFailed(format!(
            "could not run curl ({}). Install curl, or download {} to {:?} manually",
            e, url, model_path
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_url() {
        let url = model_url(ModelSize::Base);
        assert!(url.contains("huggingface.co"));
        assert!(url.ends_with("ggml-base.bin"));
    }

    #[test]
    fn test_large_alias_url() {
        assert!(model_url(ModelSize::Large).ends_with("ggml-large-v3.bin"));
        assert!(model_url(ModelSize::LargeV2).ends_with("ggml-large-v2.bin"));
    }
}
