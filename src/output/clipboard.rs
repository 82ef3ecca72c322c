//! Clipboard copy via the platform's clipboard helper
//!
//! Spawns the first available helper with the text piped to stdin:
//! pbcopy on macOS, wl-copy / xclip / xsel on Linux, clip on Windows.
//! Keeping this a subprocess avoids linking a GUI toolkit into a
//! terminal tool.

use crate::error::OutputError;
use std::io::Write;
use std::process::{Command, Stdio};

/// Candidate helpers in preference order for the current platform
fn candidates() -> &'static [(&'static str, &'static [&'static str])] {
    if cfg!(target_os = "macos") {
        &[("pbcopy", &[])]
    } else if cfg!(target_os = "windows") {
        &[("clip", &[])]
    } else {
        &[
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ]
    }
}

/// Copy text to the system clipboard.
pub fn copy(text: &str) -> Result<(), OutputError> {
    if text.is_empty() {
        return Ok(());
    }

    let (helper, args) = candidates()
        .iter()
        .find(|(name, _)| which::which(name).is_ok())
        .ok_or(OutputError::NoClipboardHelper)?;

    let mut child = Command::new(helper)
        .args(*args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| OutputError::ClipboardFailed(format!("{}: {}", helper, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| OutputError::ClipboardFailed(e.to_string()))?;
        // Close stdin to signal EOF
        drop(stdin);
    }

    let status = child
        .wait()
        .map_err(|e| OutputError::ClipboardFailed(e.to_string()))?;

    if !status.success() {
        return Err(OutputError::ClipboardFailed(format!(
            "{} exited with {}",
            helper, status
        )));
    }

    tracing::debug!("Copied {} chars to clipboard via {}", text.len(), helper);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_a_noop() {
        // Must not depend on any helper being installed
        assert!(copy("").is_ok());
    }

    #[test]
    fn test_candidates_are_platform_specific() {
        let names: Vec<&str> = candidates().iter().map(|(n, _)| *n).collect();
        assert!(!names.is_empty());
        if cfg!(target_os = "macos") {
            assert_eq!(names, ["pbcopy"]);
        } else if cfg!(target_os = "linux") {
            assert!(names.contains(&"wl-copy"));
        }
    }
}
