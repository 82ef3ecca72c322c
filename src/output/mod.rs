//! Transcription output module
//!
//! Renders a transcription for the terminal and routes it to the chosen
//! destinations: stdout, an append-only file, and/or the clipboard.
//! Rendering is presentational only; the result's field shapes are
//! guaranteed by the transcribe module.

pub mod clipboard;

use crate::error::OutputError;
use crate::transcribe::{Segment, Transcription};
use std::io::Write;
use std::path::PathBuf;

/// Format seconds as M:SS
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// One "[start-end] text" line per segment
fn timestamped_lines(segments: &[Segment]) -> Vec<String> {
    segments
        .iter()
        .map(|seg| {
            format!(
                "[{}-{}] {}",
                format_timestamp(seg.start),
                format_timestamp(seg.end),
                seg.text
            )
        })
        .collect()
}

/// Format a transcription result for display.
///
/// Quiet mode returns only the text (or timestamped lines); otherwise the
/// text is wrapped in a banner with duration and language.
pub fn render(
    result: &Transcription,
    duration: f64,
    show_timestamps: bool,
    quiet: bool,
) -> String {
    if quiet {
        if show_timestamps && !result.segments.is_empty() {
            return timestamped_lines(&result.segments).join("\n");
        }
        return result.text.clone();
    }

    let mut lines = vec![
        String::new(),
        "=".repeat(50),
        "  TRANSCRIPTION".to_string(),
        "=".repeat(50),
        String::new(),
    ];

    if show_timestamps && !result.segments.is_empty() {
        lines.extend(timestamped_lines(&result.segments));
    } else {
        lines.push(result.text.clone());
    }

    lines.push(String::new());
    lines.push(format!(
        "Duration: {:.2}s | Language: {}",
        duration,
        result.language.as_deref().unwrap_or("unknown")
    ));
    lines.push("=".repeat(50));
    lines.push(String::new());

    lines.join("\n")
}

/// Routes rendered transcriptions to their destinations
pub struct Emitter {
    pub quiet: bool,
    pub timestamps: bool,
    pub output_file: Option<PathBuf>,
    pub copy: bool,
}

impl Emitter {
    /// Emit one transcription result.
    ///
    /// A file write failure is fatal to the run; a clipboard failure is
    /// surfaced as a warning and the session continues.
    pub fn emit(&self, result: &Transcription, duration: f64) -> Result<(), OutputError> {
        let rendered = render(result, duration, self.timestamps, self.quiet);

        if let Some(path) = &self.output_file {
            append_to_file(path, &rendered)?;
            if !self.quiet {
                println!("Saved to {}", path.display());
            }
        } else {
            println!("{}", rendered);
        }

        if self.copy {
            let text = if self.timestamps && !result.segments.is_empty() {
                timestamped_lines(&result.segments).join("\n")
            } else {
                result.text.clone()
            };

            if let Err(e) = clipboard::copy(&text) {
                eprintln!("Warning: could not copy to clipboard: {}", e);
            } else if !self.quiet {
                println!("Copied to clipboard.");
            }
        }

        Ok(())
    }
}

fn append_to_file(path: &PathBuf, rendered: &str) -> Result<(), OutputError> {
    let map_err = |source: std::io::Error| OutputError::FileWrite {
        path: path.display().to_string(),
        source,
    };

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(map_err)?;

    file.write_all(rendered.as_bytes()).map_err(map_err)?;
    if !rendered.ends_with('\n') {
        file.write_all(b"\n").map_err(map_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_segments() -> Transcription {
        Transcription {
            text: "Hello world".to_string(),
            segments: vec![
                Segment {
                    start: 0.0,
                    end: 2.5,
                    text: "Hello".to_string(),
                    words: None,
                },
                Segment {
                    start: 2.5,
                    end: 5.0,
                    text: "world".to_string(),
                    words: None,
                },
            ],
            language: Some("en".to_string()),
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(45.0), "0:45");
        assert_eq!(format_timestamp(60.0), "1:00");
        assert_eq!(format_timestamp(90.0), "1:30");
        assert_eq!(format_timestamp(125.0), "2:05");
        // fractional seconds round down
        assert_eq!(format_timestamp(45.9), "0:45");
    }

    #[test]
    fn test_quiet_mode_returns_only_text() {
        let result = Transcription {
            text: "Hello world".to_string(),
            ..Default::default()
        };
        assert_eq!(render(&result, 5.0, false, true), "Hello world");
    }

    #[test]
    fn test_quiet_mode_with_timestamps() {
        let output = render(&result_with_segments(), 5.0, true, true);
        assert!(output.contains("[0:00-0:02] Hello"));
        assert!(output.contains("[0:02-0:05] world"));
    }

    #[test]
    fn test_full_output_includes_banner() {
        let output = render(&result_with_segments(), 3.0, false, false);
        assert!(output.contains("TRANSCRIPTION"));
        assert!(output.contains("Hello world"));
        assert!(output.contains("Duration: 3.00s"));
        assert!(output.contains("Language: en"));
    }

    #[test]
    fn test_unknown_language_in_banner() {
        let result = Transcription {
            text: "Test".to_string(),
            ..Default::default()
        };
        let output = render(&result, 1.0, false, false);
        assert!(output.contains("Language: unknown"));
    }

    #[test]
    fn test_emit_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.txt");

        let emitter = Emitter {
            quiet: true,
            timestamps: false,
            output_file: Some(path.clone()),
            copy: false,
        };

        let result = Transcription {
            text: "first".to_string(),
            ..Default::default()
        };
        emitter.emit(&result, 1.0).unwrap();

        let result = Transcription {
            text: "second".to_string(),
            ..Default::default()
        };
        emitter.emit(&result, 1.0).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_emit_to_unwritable_path_fails() {
        let emitter = Emitter {
            quiet: true,
            timestamps: false,
            output_file: Some(PathBuf::from("/nonexistent-dir/transcript.txt")),
            copy: false,
        };

        let result = Transcription {
            text: "text".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            emitter.emit(&result, 1.0),
            Err(OutputError::FileWrite { .. })
        ));
    }
}
