// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal for low-latency playback.
//!
//! Samples are queued into a bounded buffer drained by the device callback.
//! The callback also counts the frames it actually played, which is the
//! source of truth for the music progress bar.

use crate::domain::music::Volume;
use crate::error::AudioError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::error;

/// Audio samples to be played.
/// Interleaved f32 samples normalized to [-1.0, 1.0].
pub type AudioSamples = Arc<Vec<f32>>;

/// Sample rate and channel count of the output device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

/// Commands for controlling audio output.
#[derive(Debug)]
pub enum OutputCommand {
    /// Queue audio samples.
    Queue(AudioSamples),
    /// Output silence, keep the buffer.
    Pause,
    /// Resume draining the buffer.
    Resume,
    /// Drop buffered samples and reset the played-frame counter.
    Clear,
    /// Set volume (0.0–1.0, perceptually scaled).
    SetVolume(Volume),
}

/// Shared state between audio thread and main thread.
struct SharedState {
    /// Current volume (stored as u32 bits of f32 for atomic access).
    volume_bits: AtomicU32,
    paused: AtomicBool,
    /// Frames handed to the device since the last clear.
    frames_played: AtomicU64,
}

impl SharedState {
    fn new(initial_volume: Volume) -> Self {
        Self {
            volume_bits: AtomicU32::new(initial_volume.value().to_bits()),
            paused: AtomicBool::new(true),
            frames_played: AtomicU64::new(0),
        }
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    fn set_volume(&self, volume: Volume) {
        self.volume_bits
            .store(volume.value().to_bits(), Ordering::Relaxed);
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    fn frames_played(&self) -> u64 {
        self.frames_played.load(Ordering::Relaxed)
    }

    fn add_frames(&self, frames: u64) {
        self.frames_played.fetch_add(frames, Ordering::Relaxed);
    }

    fn reset_frames(&self) {
        self.frames_played.store(0, Ordering::Relaxed);
    }
}

/// Applies the quadratic volume curve and clamps to a range every sample
/// format can represent.
fn scale_sample(sample: f32, volume: f32) -> f32 {
    (sample * volume * volume).clamp(-1.0, 0.999_999_9)
}

/// Converts a played-frame count to a playback position.
#[must_use]
pub fn frames_to_position(frames: u64, sample_rate: u32) -> Duration {
    if sample_rate == 0 {
        return Duration::ZERO;
    }
    #[allow(clippy::cast_precision_loss)]
    Duration::from_secs_f64(frames as f64 / f64::from(sample_rate))
}

/// Audio output stream manager.
///
/// Starts paused; nothing is heard until [`OutputCommand::Resume`].
pub struct AudioOutput {
    command_tx: mpsc::UnboundedSender<OutputCommand>,
    shared_state: Arc<SharedState>,
    format: OutputFormat,
    /// The audio stream (kept alive to maintain playback).
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device.
    ///
    /// Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::NoDevice`] if no output device exists and
    /// [`AudioError::Rejected`] if the device refuses the stream.
    pub fn new(initial_volume: Volume) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| AudioError::Rejected(format!("no usable output config: {e}")))?;

        let format = OutputFormat {
            sample_rate: supported_config.sample_rate().0,
            channels: supported_config.channels(),
        };

        let shared_state = Arc::new(SharedState::new(initial_volume));
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<OutputCommand>();

        // Bounded to one second of audio
        let max_buffer_size = (format.sample_rate as usize) * (format.channels as usize);
        let buffer: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::with_capacity(max_buffer_size)));

        let buffer_for_task = Arc::clone(&buffer);
        let shared_for_task = Arc::clone(&shared_state);
        tokio::spawn(async move {
            while let Some(cmd) = command_rx.recv().await {
                match cmd {
                    OutputCommand::Queue(samples) => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            let available_space = max_buffer_size.saturating_sub(buf.len());
                            let take = samples.len().min(available_space);
                            buf.extend_from_slice(&samples[..take]);
                        }
                    }
                    OutputCommand::Pause => shared_for_task.set_paused(true),
                    OutputCommand::Resume => shared_for_task.set_paused(false),
                    OutputCommand::Clear => {
                        if let Ok(mut buf) = buffer_for_task.lock() {
                            buf.clear();
                        }
                        shared_for_task.reset_frames();
                    }
                    OutputCommand::SetVolume(volume) => shared_for_task.set_volume(volume),
                }
            }
        });

        let stream_config: cpal::StreamConfig = supported_config.clone().into();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &stream_config,
                buffer,
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &stream_config,
                buffer,
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &stream_config,
                buffer,
                Arc::clone(&shared_state),
            )?,
            other => {
                return Err(AudioError::Rejected(format!(
                    "unsupported sample format {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| AudioError::Rejected(format!("failed to start audio stream: {e}")))?;

        Ok(Self {
            command_tx,
            shared_state,
            format,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: Arc<Mutex<Vec<f32>>>,
        shared_state: Arc<SharedState>,
    ) -> Result<cpal::Stream, AudioError> {
        let channels = usize::from(config.channels.max(1));
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let silence = T::from_sample(0.0f32);
                    if shared_state.is_paused() {
                        data.fill(silence);
                        return;
                    }
                    let Ok(mut buf) = buffer.lock() else {
                        data.fill(silence);
                        return;
                    };

                    let volume = shared_state.volume();
                    for (i, sample) in data.iter_mut().enumerate() {
                        *sample = match buf.get(i) {
                            Some(&value) => T::from_sample(scale_sample(value, volume)),
                            None => silence,
                        };
                    }

                    let consumed = data.len().min(buf.len());
                    buf.drain(..consumed);
                    shared_state.add_frames((consumed / channels) as u64);
                },
                |err| {
                    error!(%err, "audio output stream error");
                },
                None,
            )
            .map_err(|e| AudioError::Rejected(format!("failed to build audio stream: {e}")))
    }

    /// Sends a command to the audio output.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::NotReady`] if the command task has stopped.
    pub fn send(&self, command: OutputCommand) -> Result<(), AudioError> {
        self.command_tx
            .send(command)
            .map_err(|_| AudioError::NotReady)
    }

    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.shared_state.volume()
    }

    /// Position reached since the last [`OutputCommand::Clear`].
    #[must_use]
    pub fn position(&self) -> Duration {
        frames_to_position(self.shared_state.frames_played(), self.format.sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn shared_state_starts_paused() {
        let state = SharedState::new(Volume::new(0.8));
        assert!(state.is_paused());
        assert_abs_diff_eq!(state.volume(), 0.8);
        state.set_paused(false);
        assert!(!state.is_paused());
    }

    #[test]
    fn shared_state_counts_and_resets_frames() {
        let state = SharedState::new(Volume::default());
        state.add_frames(480);
        state.add_frames(20);
        assert_eq!(state.frames_played(), 500);
        state.reset_frames();
        assert_eq!(state.frames_played(), 0);
    }

    #[test]
    fn volume_curve_is_quadratic_and_clamped() {
        assert_abs_diff_eq!(scale_sample(1.0, 0.5), 0.25);
        assert_abs_diff_eq!(scale_sample(-1.0, 1.0), -1.0);
        assert!(scale_sample(1.0, 1.0) < 1.0);
        assert_abs_diff_eq!(scale_sample(0.7, 0.0), 0.0);
    }

    #[test]
    fn frames_convert_to_position() {
        assert_eq!(frames_to_position(48_000, 48_000), Duration::from_secs(1));
        assert_eq!(
            frames_to_position(22_050, 44_100),
            Duration::from_millis(500)
        );
        assert_eq!(frames_to_position(100, 0), Duration::ZERO);
    }

    #[tokio::test]
    #[ignore = "requires audio hardware"]
    async fn audio_output_can_be_created() {
        if let Ok(output) = AudioOutput::new(Volume::new(0.8)) {
            assert_abs_diff_eq!(output.volume(), 0.8);
            assert!(output.format().sample_rate > 0);
            assert_eq!(output.position(), Duration::ZERO);
        }
    }
}
