//! cpal-based microphone capture
//!
//! The audio backend delivers fixed-size chunks on its own callback thread.
//! Chunks are accumulated in a shared list and only concatenated into one
//! contiguous buffer after the user stops the recording, so no reallocation
//! happens per chunk. An atomic stop flag is checked before every append:
//! once the flag is set, late callbacks fired during stream teardown are
//! dropped and never reach the finalized buffer.

use super::{AudioBuffer, AudioCapture};
use crate::config::AudioConfig;
use crate::error::AudioError;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// cpal-based audio capture implementation
pub struct CpalCapture {
    config: AudioConfig,
}

impl CpalCapture {
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl AudioCapture for CpalCapture {
    fn record(&mut self, silent: bool) -> Result<AudioBuffer, AudioError> {
        use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

        let host = cpal::default_host();

        let device = if self.config.device == "default" {
            host.default_input_device()
                .ok_or_else(|| AudioError::DeviceUnavailable("no input device found".to_string()))?
        } else {
            find_input_device(&host, &self.config.device)?
        };

        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());
        tracing::info!("Using audio device: {}", device_name);

        let supported_config = device
            .default_input_config()
            .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?;

        let source_rate = supported_config.sample_rate().0;
        let source_channels = supported_config.channels() as usize;
        let sample_format = supported_config.sample_format();
        let target_rate = self.config.sample_rate;

        tracing::debug!(
            "Device config: {} Hz, {} channel(s), format: {:?}",
            source_rate,
            source_channels,
            sample_format
        );

        let stream_config = cpal::StreamConfig {
            channels: supported_config.channels(),
            sample_rate: supported_config.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        let stop = Arc::new(AtomicBool::new(false));
        let chunks: Arc<Mutex<Vec<Vec<f32>>>> = Arc::new(Mutex::new(Vec::new()));

        let params = StreamParams {
            stop: stop.clone(),
            chunks: chunks.clone(),
            source_rate,
            target_rate,
            source_channels,
        };

        // Degraded streams keep running; a status warning is not fatal.
        let err_fn = |err| tracing::warn!("Audio stream warning: {}", err);

        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, params, err_fn),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, params, err_fn),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, params, err_fn),
            format => return Err(AudioError::UnsupportedFormat(format!("{:?}", format))),
        }?;

        stream
            .play()
            .map_err(|e| AudioError::Stream(e.to_string()))?;

        if !silent {
            println!("\nRecording... Press Enter to stop.\n");
        }

        // Block until Enter or EOF (stdin closed also stops the recording).
        let mut line = String::new();
        let _ = std::io::stdin().lock().read_line(&mut line);

        // Signal first, then tear down: callbacks past this point are dropped.
        stop.store(true, Ordering::Release);
        drop(stream);

        let collected = chunks
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default();

        let buffer = finalize_chunks(collected, target_rate);
        tracing::debug!(
            "Recording stopped: {} samples ({:.2}s)",
            buffer.len(),
            buffer.duration()
        );

        Ok(buffer)
    }
}

/// Shared state handed to the audio callback
struct StreamParams {
    stop: Arc<AtomicBool>,
    chunks: Arc<Mutex<Vec<Vec<f32>>>>,
    source_rate: u32,
    target_rate: u32,
    source_channels: usize,
}

/// Build an input stream for a specific sample type
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    params: StreamParams,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, AudioError>
where
    T: cpal::Sample + cpal::SizedSample + Send + 'static,
    f32: cpal::FromSample<T>,
{
    use cpal::traits::DeviceTrait;

    let StreamParams {
        stop,
        chunks,
        source_rate,
        target_rate,
        source_channels,
    } = params;

    let stream = device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                // Convert to f32 and mix down to mono
                let mono: Vec<f32> = data
                    .chunks(source_channels)
                    .map(|frame| {
                        let sum: f32 = frame
                            .iter()
                            .map(|&s| <f32 as cpal::FromSample<T>>::from_sample_(s))
                            .sum();
                        sum / source_channels as f32
                    })
                    .collect();

                let resampled = if source_rate != target_rate {
                    resample(&mono, source_rate, target_rate)
                } else {
                    mono
                };

                push_chunk(&stop, &chunks, resampled);
            },
            err_fn,
            None,
        )
        .map_err(|e| AudioError::Stream(e.to_string()))?;

    Ok(stream)
}

/// Append one chunk to the accumulation list unless the stop signal is set.
fn push_chunk(stop: &AtomicBool, chunks: &Mutex<Vec<Vec<f32>>>, chunk: Vec<f32>) {
    if stop.load(Ordering::Acquire) {
        return;
    }
    if let Ok(mut guard) = chunks.lock() {
        guard.push(chunk);
    }
}

/// Concatenate accumulated chunks into one contiguous, clamped buffer.
fn finalize_chunks(chunks: Vec<Vec<f32>>, sample_rate: u32) -> AudioBuffer {
    if chunks.is_empty() {
        return AudioBuffer::empty(sample_rate);
    }

    let total: usize = chunks.iter().map(Vec::len).sum();
    let mut samples = Vec::with_capacity(total);
    for chunk in chunks {
        samples.extend_from_slice(&chunk);
    }

    AudioBuffer::new(samples, sample_rate)
}

/// Find an audio input device by name.
///
/// Tries an exact match first, then a case-insensitive substring match so
/// users can pass short names like "usb" or "analog-stereo".
fn find_input_device(host: &cpal::Host, name: &str) -> Result<cpal::Device, AudioError> {
    use cpal::traits::{DeviceTrait, HostTrait};

    let devices: Vec<cpal::Device> = host
        .input_devices()
        .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?
        .collect();

    let search = name.to_lowercase();

    for device in &devices {
        if device.name().map(|n| n == name).unwrap_or(false) {
            tracing::debug!("Found audio device by exact match: {}", name);
            return take_device(host, name);
        }
    }

    for device in &devices {
        if let Ok(device_name) = device.name() {
            if device_name.to_lowercase().contains(&search) {
                tracing::debug!(
                    "Found audio device by substring match: {} (searched for: {})",
                    device_name,
                    name
                );
                return take_device(host, &device_name);
            }
        }
    }

    Err(AudioError::DeviceNotFound(name.to_string()))
}

fn take_device(host: &cpal::Host, exact_name: &str) -> Result<cpal::Device, AudioError> {
    use cpal::traits::{DeviceTrait, HostTrait};

    host.input_devices()
        .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?
        .find(|d| d.name().map(|n| n == exact_name).unwrap_or(false))
        .ok_or_else(|| AudioError::DeviceNotFound(exact_name.to_string()))
}

/// Linear interpolation resampling
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let new_len = (samples.len() as f64 * ratio).ceil() as usize;
    let mut output = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let src_idx = i as f64 / ratio;
        let idx = src_idx.floor() as usize;
        let frac = (src_idx - idx as f64) as f32;

        let sample = if idx + 1 < samples.len() {
            samples[idx] * (1.0 - frac) + samples[idx + 1] * frac
        } else {
            samples.get(idx).copied().unwrap_or(0.0)
        };

        output.push(sample);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_chunk_before_stop() {
        let stop = AtomicBool::new(false);
        let chunks = Mutex::new(Vec::new());

        push_chunk(&stop, &chunks, vec![0.1, 0.2]);
        push_chunk(&stop, &chunks, vec![0.3]);

        assert_eq!(chunks.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_push_chunk_after_stop_is_dropped() {
        let stop = AtomicBool::new(false);
        let chunks = Mutex::new(Vec::new());

        push_chunk(&stop, &chunks, vec![0.1]);
        stop.store(true, Ordering::Release);
        push_chunk(&stop, &chunks, vec![0.9, 0.9]);

        let guard = chunks.lock().unwrap();
        assert_eq!(guard.len(), 1);
        assert_eq!(guard[0], vec![0.1]);
    }

    #[test]
    fn test_finalize_concatenates_in_order() {
        let buffer = finalize_chunks(vec![vec![0.1, 0.2], vec![0.3], vec![0.4, 0.5]], 16000);
        assert_eq!(buffer.samples(), &[0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(buffer.sample_rate(), 16000);
    }

    #[test]
    fn test_finalize_empty_yields_empty_buffer() {
        let buffer = finalize_chunks(Vec::new(), 16000);
        assert!(buffer.is_empty());
        assert_eq!(buffer.duration(), 0.0);
    }

    #[test]
    fn test_finalize_clamps_out_of_range_samples() {
        let buffer = finalize_chunks(vec![vec![1.5, -3.0, 0.25]], 16000);
        assert_eq!(buffer.samples(), &[1.0, -1.0, 0.25]);
    }

    #[test]
    fn test_resample_same_rate() {
        let samples = vec![1.0, 2.0, 3.0, 4.0];
        let result = resample(&samples, 16000, 16000);
        assert_eq!(result, samples);
    }

    #[test]
    fn test_resample_downsample() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let result = resample(&samples, 48000, 16000);
        // 3:1 ratio, so 8 samples -> ~3 samples
        assert!(result.len() >= 2 && result.len() <= 4);
    }

    #[test]
    fn test_resample_upsample() {
        let samples = vec![1.0, 2.0];
        let result = resample(&samples, 8000, 16000);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_resample_empty() {
        let samples: Vec<f32> = vec![];
        let result = resample(&samples, 48000, 16000);
        assert!(result.is_empty());
    }
}
