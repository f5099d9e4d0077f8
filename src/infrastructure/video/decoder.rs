// SPDX-License-Identifier: MPL-2.0
//! Video frame decoding with `FFmpeg`.
//!
//! A [`FrameDecoder`] opens a video url on a blocking thread, converts each
//! frame to RGBA and hands it over when its timestamp is due. Large sources
//! are scaled down to fit [`MAX_FRAME_WIDTH`] × [`MAX_FRAME_HEIGHT`].

use crate::error::VideoError;
use crate::infrastructure::ffmpeg::{self, Pacing};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Largest frame width handed to the UI.
pub const MAX_FRAME_WIDTH: u32 = 1280;

/// Largest frame height handed to the UI.
pub const MAX_FRAME_HEIGHT: u32 = 720;

/// A decoded frame ready for display.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Presentation time from the start of the video.
    pub position: Duration,
}

/// Commands sent to the frame decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCommand {
    Play,
    Pause,
    /// Seek back to the first frame, keeping the play/pause state.
    Rewind,
    Stop,
}

/// Events sent from the frame decoder.
#[derive(Debug, Clone)]
pub enum FrameEvent {
    /// A frame is due for display.
    Frame(VideoFrame),
    /// The last frame was shown. The decoder is now paused.
    EndOfStream,
    /// The source could not be opened or decoded.
    Failed(VideoError),
}

/// Output size for a `width` × `height` source, keeping its aspect ratio.
///
/// Sizes are rounded down to even values, which every pixel format accepts.
#[must_use]
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let fit = |side: u32| ((f64::from(side) * scale) as u32 & !1).max(2);
    (fit(width), fit(height))
}

/// Handle on a decoder thread for one video.
///
/// Dropping the handle closes the command channel, which ends the thread.
pub struct FrameDecoder {
    command_tx: mpsc::UnboundedSender<FrameCommand>,
    event_rx: mpsc::Receiver<FrameEvent>,
}

impl FrameDecoder {
    /// Starts decoding `url`. Starts paused.
    ///
    /// Must be called inside a Tokio runtime.
    #[must_use]
    pub fn spawn(url: String) -> Self {
        // Commands: unbounded (UI needs to send without blocking)
        // Events: two frames of backpressure
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);

        tokio::task::spawn_blocking(move || {
            if let Err(err) = Self::decoder_loop(&url, command_rx, &event_tx) {
                warn!(%url, error = %err, "video decoder stopped");
                let _ = event_tx.blocking_send(FrameEvent::Failed(err));
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
    /// Returns [`VideoError::DecodingFailed`] if the thread has finished.
    pub fn send(&self, command: FrameCommand) -> Result<(), VideoError> {
        self.command_tx
            .send(command)
            .map_err(|_| VideoError::DecodingFailed("video decoder is not running".to_string()))
    }

    /// Receives the next event from the decoder.
    pub async fn recv_event(&mut self) -> Option<FrameEvent> {
        self.event_rx.recv().await
    }

    #[allow(clippy::cast_precision_loss)] // FFmpeg i64 timestamps have enough f64 precision
    fn decoder_loop(
        url: &str,
        mut command_rx: mpsc::UnboundedReceiver<FrameCommand>,
        event_tx: &mpsc::Sender<FrameEvent>,
    ) -> Result<(), VideoError> {
        ffmpeg::init().map_err(VideoError::Source)?;

        let mut ictx = ffmpeg_next::format::input(&url)
            .map_err(|e| VideoError::Source(format!("failed to open video: {e}")))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(VideoError::NoVideoStream)?;
        let stream_index = input.index();
        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let context = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
            .map_err(|e| VideoError::Source(format!("failed to create codec context: {e}")))?;
        let mut decoder = context
            .decoder()
            .video()
            .map_err(|e| VideoError::Source(format!("failed to create video decoder: {e}")))?;

        let (width, height) = fit_within(
            decoder.width(),
            decoder.height(),
            MAX_FRAME_WIDTH,
            MAX_FRAME_HEIGHT,
        );
        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| VideoError::Source(format!("failed to create scaler: {e}")))?;
        debug!(%url, width, height, "video opened");

        let mut pacing = Pacing::new(Duration::ZERO);

        loop {
            match command_rx.try_recv() {
                Ok(FrameCommand::Play) => pacing.play(),
                Ok(FrameCommand::Pause) => pacing.pause(),
                Ok(FrameCommand::Rewind) => {
                    ictx.seek(0, ..0)
                        .map_err(|e| VideoError::DecodingFailed(format!("rewind failed: {e}")))?;
                    decoder.flush();
                    if pacing.is_playing() {
                        pacing.play();
                    }
                }
                Ok(FrameCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => break,
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !pacing.is_playing() {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            }

            let mut next = None;
            for (stream, packet) in ictx.packets() {
                if stream.index() != stream_index {
                    continue;
                }
                if let Err(e) = decoder.send_packet(&packet) {
                    debug!(error = %e, "skipping undecodable packet");
                    continue;
                }
                let mut decoded = ffmpeg_next::frame::Video::empty();
                if decoder.receive_frame(&mut decoded).is_err() {
                    continue;
                }
                let mut rgba = ffmpeg_next::frame::Video::empty();
                if let Err(e) = scaler.run(&decoded, &mut rgba) {
                    debug!(error = %e, "scaling failed");
                    continue;
                }
                let pts_secs = decoded
                    .timestamp()
                    .map_or(0.0, |pts| pts as f64 * time_base_f64);
                next = Some((extract_rgba(&rgba), pts_secs));
                break;
            }

            let Some((pixels, pts_secs)) = next else {
                pacing.pause();
                if event_tx.blocking_send(FrameEvent::EndOfStream).is_err() {
                    break;
                }
                continue;
            };

            if let Some(wait) = pacing.delay_for(pts_secs) {
                std::thread::sleep(wait);
            }
            let frame = VideoFrame {
                rgba: Arc::new(pixels),
                width,
                height,
                position: Duration::from_secs_f64(pts_secs.max(0.0)),
            };
            if event_tx.blocking_send(FrameEvent::Frame(frame)).is_err() {
                break;
            }
        }

        Ok(())
    }
}

/// Copies RGBA rows out of a frame, dropping the stride padding.
fn extract_rgba(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let row_bytes = frame.width() as usize * 4;
    let stride = frame.stride(0);
    let data = frame.data(0);

    let mut pixels = Vec::with_capacity(row_bytes * frame.height() as usize);
    for row in data.chunks(stride).take(frame.height() as usize) {
        pixels.extend_from_slice(&row[..row_bytes.min(row.len())]);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_videos_keep_their_size() {
        assert_eq!(fit_within(640, 360, 1280, 720), (640, 360));
        assert_eq!(fit_within(1280, 720, 1280, 720), (1280, 720));
    }

    #[test]
    fn large_videos_are_scaled_to_fit() {
        assert_eq!(fit_within(1920, 1080, 1280, 720), (1280, 720));
        assert_eq!(fit_within(3840, 2160, 1280, 720), (1280, 720));
        // portrait phone footage is bound by height
        assert_eq!(fit_within(1080, 1920, 1280, 720), (404, 720));
    }

    #[test]
    fn empty_sources_have_no_size() {
        assert_eq!(fit_within(0, 1080, 1280, 720), (0, 0));
    }

    #[tokio::test]
    async fn missing_file_reports_failure() {
        let mut decoder = FrameDecoder::spawn("/nonexistent/memory.mp4".to_string());
        let event = decoder.recv_event().await;
        assert!(matches!(
            event,
            Some(FrameEvent::Failed(VideoError::Source(_)))
        ));
    }
}
