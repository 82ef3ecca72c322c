//! Audio capture module
//!
//! Provides microphone recording using cpal, which works with PipeWire,
//! PulseAudio, ALSA, and CoreAudio backends.

pub mod capture;

use crate::config::AudioConfig;
use crate::error::AudioError;

/// One finalized recording: mono f32 samples at a fixed rate.
///
/// Produced by [`AudioCapture::record`] at the end of a session and
/// immutable afterwards. Samples are clamped to [-1.0, 1.0] so a later
/// fixed-point conversion cannot overflow. An empty buffer is a valid
/// "no speech captured" outcome with duration 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Build a buffer from raw samples, clamping amplitude to [-1.0, 1.0].
    pub fn new(mut samples: Vec<f32>, sample_rate: u32) -> Self {
        for s in &mut samples {
            *s = s.clamp(-1.0, 1.0);
        }
        Self {
            samples,
            sample_rate,
        }
    }

    /// An empty buffer with duration 0.0.
    pub fn empty(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds, derived from length and sample rate.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Trait for audio capture implementations
pub trait AudioCapture {
    /// Record from the microphone until the user presses Enter (or stdin
    /// reaches EOF). Blocks the calling thread; audio chunks arrive on the
    /// capture backend's own callback thread.
    ///
    /// `silent` suppresses the human-facing recording prompt.
    fn record(&mut self, silent: bool) -> Result<AudioBuffer, AudioError>;
}

/// Factory function to create the microphone capture
pub fn create_capture(config: &AudioConfig) -> Box<dyn AudioCapture> {
    Box::new(capture::CpalCapture::new(config))
}

/// Return a formatted listing of available audio input devices.
pub fn list_devices() -> Result<String, AudioError> {
    use cpal::traits::{DeviceTrait, HostTrait};

    let host = cpal::default_host();
    let default_name = host
        .default_input_device()
        .and_then(|d| d.name().ok());

    let mut lines = vec!["Available audio input devices:".to_string(), String::new()];

    let devices = host
        .input_devices()
        .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?;

    for (i, device) in devices.enumerate() {
        let name = device.name().unwrap_or_else(|_| "unknown".to_string());
        let marker = if Some(&name) == default_name.as_ref() {
            " (default)"
        } else {
            ""
        };
        lines.push(format!("  [{}] {}{}", i, name, marker));
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_matches_length() {
        let buffer = AudioBuffer::new(vec![0.0; 32000], 16000);
        assert!((buffer.duration() - 2.0).abs() < 1e-9);

        let buffer = AudioBuffer::new(vec![0.0; 8001], 16000);
        assert!((buffer.duration() - 8001.0 / 16000.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_buffer_has_zero_duration() {
        let buffer = AudioBuffer::empty(16000);
        assert!(buffer.is_empty());
        assert_eq!(buffer.duration(), 0.0);
    }

    #[test]
    fn test_clamping_preserves_sample_count() {
        let buffer = AudioBuffer::new(vec![-2.5, -1.0, 0.5, 1.0, 3.7], 16000);
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.samples(), &[-1.0, -1.0, 0.5, 1.0, 1.0]);
        assert!(buffer.samples().iter().all(|s| (-1.0..=1.0).contains(s)));
    }
}
