// SPDX-License-Identifier: MPL-2.0
//! Background track decoding with `FFmpeg`.
//!
//! A [`TrackDecoder`] opens a track url (local path or http(s) stream) on a
//! blocking thread, resamples it to the output format and sends paced
//! buffers back. At the end of the stream it stops and reports
//! [`DecoderEvent::EndOfStream`]; looping is the controller's decision.

use super::output::{AudioSamples, OutputFormat};
use crate::error::AudioError;
use crate::infrastructure::ffmpeg::{self, Pacing};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Audio look-ahead buffer time.
/// Buffers are queued this much before they need to play.
const AUDIO_LOOKAHEAD: Duration = Duration::from_millis(200);

/// Events sent from the track decoder.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// The source opened; the duration is `None` for live or unknown streams.
    Opened { duration: Option<Duration> },
    /// A decoded buffer is ready for the output.
    Buffer(AudioSamples),
    /// The track reached its end. The decoder is now paused.
    EndOfStream,
    /// The source could not be opened or decoded.
    Failed(AudioError),
}

/// Commands sent to the track decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderCommand {
    Play,
    Pause,
    /// Seek back to the start of the track.
    Rewind,
    Stop,
}

/// Handle on a decoder thread for one track.
///
/// Dropping the handle closes the command channel, which ends the thread.
pub struct TrackDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl TrackDecoder {
    /// Starts decoding `url` for the given output format. Starts paused.
    ///
    /// Must be called inside a Tokio runtime.
    #[must_use]
    pub fn spawn(url: String, format: OutputFormat) -> Self {
        // Commands: unbounded (UI needs to send without blocking)
        // Events: bounded so decoding never runs far ahead of the output
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(4);

        tokio::task::spawn_blocking(move || {
            if let Err(err) = Self::decoder_loop(&url, command_rx, &event_tx, format) {
                warn!(%url, error = %err, "track decoder stopped");
                let _ = event_tx.blocking_send(DecoderEvent::Failed(err));
            }
        });

        Self {
            command_tx,
            event_rx,
        }
    }

    /// Sends a command to the decoder thread.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::NotReady`] if the thread has finished.
    pub fn send(&self, command: DecoderCommand) -> Result<(), AudioError> {
        self.command_tx
            .send(command)
            .map_err(|_| AudioError::NotReady)
    }

    /// Receives the next event from the decoder.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    #[allow(clippy::cast_precision_loss)] // FFmpeg i64 timestamps have enough f64 precision
    #[allow(clippy::cast_sign_loss)] // Duration is checked to be positive
    fn decoder_loop(
        url: &str,
        mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        event_tx: &mpsc::Sender<DecoderEvent>,
        format: OutputFormat,
    ) -> Result<(), AudioError> {
        ffmpeg::init().map_err(AudioError::Source)?;

        let mut ictx = ffmpeg_next::format::input(&url)
            .map_err(|e| AudioError::Source(format!("failed to open track: {e}")))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .ok_or_else(|| AudioError::Source("no audio stream".to_string()))?;
        let stream_index = input.index();
        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let context = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
            .map_err(|e| AudioError::Source(format!("failed to create codec context: {e}")))?;
        let mut decoder = context
            .decoder()
            .audio()
            .map_err(|e| AudioError::Source(format!("failed to create audio decoder: {e}")))?;

        let duration = if ictx.duration() > 0 {
            // Container duration is expressed in AV_TIME_BASE (microseconds)
            Some(Duration::from_micros(ictx.duration() as u64))
        } else {
            None
        };
        if event_tx
            .blocking_send(DecoderEvent::Opened { duration })
            .is_err()
        {
            return Ok(());
        }

        let output_layout = match format.channels {
            1 => ffmpeg_next::ChannelLayout::MONO,
            _ => ffmpeg_next::ChannelLayout::STEREO,
        };
        let output_channels: u16 = if format.channels == 1 { 1 } else { 2 };
        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
            output_layout,
            format.sample_rate,
        )
        .map_err(|e| AudioError::Source(format!("failed to create resampler: {e}")))?;

        let mut pacing = Pacing::new(AUDIO_LOOKAHEAD);

        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play) => pacing.play(),
                Ok(DecoderCommand::Pause) => pacing.pause(),
                Ok(DecoderCommand::Rewind) => {
                    ictx.seek(0, ..0)
                        .map_err(|e| AudioError::Source(format!("rewind failed: {e}")))?;
                    decoder.flush();
                    if pacing.is_playing() {
                        pacing.play();
                    }
                }
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => break,
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !pacing.is_playing() {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            }

            let mut buffer = None;
            for (stream, packet) in ictx.packets() {
                if stream.index() != stream_index {
                    continue;
                }
                if let Err(e) = decoder.send_packet(&packet) {
                    debug!(error = %e, "skipping undecodable packet");
                    continue;
                }
                let mut decoded = ffmpeg_next::frame::Audio::empty();
                if decoder.receive_frame(&mut decoded).is_err() {
                    continue;
                }
                let mut resampled = ffmpeg_next::frame::Audio::empty();
                if let Err(e) = resampler.run(&decoded, &mut resampled) {
                    debug!(error = %e, "resampling failed");
                    continue;
                }
                let pts_secs = decoded
                    .timestamp()
                    .map_or(0.0, |pts| pts as f64 * time_base_f64);
                buffer = Some((extract_samples(&resampled, output_channels), pts_secs));
                break;
            }

            let Some((samples, pts_secs)) = buffer else {
                pacing.pause();
                if event_tx.blocking_send(DecoderEvent::EndOfStream).is_err() {
                    break;
                }
                continue;
            };

            if let Some(wait) = pacing.delay_for(pts_secs) {
                std::thread::sleep(wait);
            }
            if event_tx
                .blocking_send(DecoderEvent::Buffer(Arc::new(samples)))
                .is_err()
            {
                break;
            }
        }

        Ok(())
    }
}

/// Extracts f32 samples from a resampled, packed audio frame.
fn extract_samples(frame: &ffmpeg_next::frame::Audio, channels: u16) -> Vec<f32> {
    let data = frame.data(0);
    let sample_count = frame.samples() * usize::from(channels);
    data.chunks_exact(4)
        .take(sample_count)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}
