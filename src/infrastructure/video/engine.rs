// SPDX-License-Identifier: MPL-2.0
//! Video engine thread.
//!
//! Each displayed video gets its own engine thread. Like the music engine it
//! runs a single-threaded Tokio runtime, because the soundtrack's cpal stream
//! cannot leave the thread that created it. The engine drives a
//! [`FrameDecoder`] for the picture and a [`TrackDecoder`] for the sound, and
//! starts playing as soon as it is up.

use super::decoder::{FrameCommand, FrameDecoder, FrameEvent, VideoFrame};
use crate::domain::music::Volume;
use crate::error::VideoError;
use crate::infrastructure::audio::decoder::{DecoderCommand, DecoderEvent, TrackDecoder};
use crate::infrastructure::audio::output::{AudioOutput, OutputCommand};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Commands accepted by a video engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCommand {
    Play,
    Pause,
    /// Start over from the first frame.
    Replay,
}

/// Handle used by the UI to command a video engine.
#[derive(Clone)]
pub struct VideoHandle {
    command_tx: mpsc::UnboundedSender<VideoCommand>,
}

impl VideoHandle {
    pub(crate) fn new(command_tx: mpsc::UnboundedSender<VideoCommand>) -> Self {
        Self { command_tx }
    }

    /// Sends a command to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::DecodingFailed`] if the engine has stopped.
    pub fn send(&self, command: VideoCommand) -> Result<(), VideoError> {
        self.command_tx
            .send(command)
            .map_err(|_| VideoError::DecodingFailed("video engine stopped".to_string()))
    }
}

impl std::fmt::Debug for VideoHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoHandle")
            .field("closed", &self.command_tx.is_closed())
            .finish()
    }
}

/// Events emitted by a video engine.
#[derive(Debug, Clone)]
pub enum VideoEvent {
    /// The engine accepts commands.
    Ready(VideoHandle),
    /// Frames started flowing after a play request.
    Started,
    Frame(VideoFrame),
    /// The last frame was shown.
    Ended,
    Failed(VideoError),
}

/// Runs the engine for `url` until the UI goes away. Blocks the caller.
pub(crate) fn run_video_engine(
    url: String,
    mut commands: mpsc::UnboundedReceiver<VideoCommand>,
    events: mpsc::UnboundedSender<VideoEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            let _ = events.send(VideoEvent::Failed(VideoError::DecodingFailed(format!(
                "failed to start video runtime: {e}"
            ))));
            return;
        }
    };

    runtime.block_on(async move {
        let watcher = events.clone();
        let mut engine = Engine {
            frames: FrameDecoder::spawn(url.clone()),
            soundtrack: Soundtrack::open(&url),
            awaiting_start: false,
            events,
        };
        info!(%url, sound = engine.soundtrack.is_some(), "video engine started");
        engine.on_command(VideoCommand::Play);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => engine.on_command(command),
                    None => break,
                },
                event = engine.frames.recv_event() => match event {
                    Some(event) => engine.on_frame_event(event),
                    None => break,
                },
                event = next_sound_event(&mut engine.soundtrack) => match event {
                    Some(event) => engine.on_sound_event(event),
                    None => engine.soundtrack = None,
                },
                () = watcher.closed() => break,
            }
        }

        let _ = engine.frames.send(FrameCommand::Stop);
        if let Some(soundtrack) = &engine.soundtrack {
            let _ = soundtrack.decoder.send(DecoderCommand::Stop);
        }
        debug!(%url, "video engine stopped");
    });
}

async fn next_sound_event(soundtrack: &mut Option<Soundtrack>) -> Option<DecoderEvent> {
    match soundtrack {
        Some(soundtrack) => soundtrack.decoder.recv_event().await,
        None => std::future::pending().await,
    }
}

/// The video's own audio track and the device it plays on.
struct Soundtrack {
    decoder: TrackDecoder,
    output: AudioOutput,
}

impl Soundtrack {
    /// Opens the soundtrack of `url`; `None` plays the video silently.
    fn open(url: &str) -> Option<Self> {
        match AudioOutput::new(Volume::new(1.0)) {
            Ok(output) => Some(Self {
                decoder: TrackDecoder::spawn(url.to_string(), output.format()),
                output,
            }),
            Err(err) => {
                warn!(error = %err, "video plays without sound");
                None
            }
        }
    }

    fn play(&self) {
        let _ = self.decoder.send(DecoderCommand::Play);
        let _ = self.output.send(OutputCommand::Resume);
    }

    fn pause(&self) {
        let _ = self.decoder.send(DecoderCommand::Pause);
        let _ = self.output.send(OutputCommand::Pause);
    }

    fn replay(&self) {
        let _ = self.output.send(OutputCommand::Clear);
        let _ = self.decoder.send(DecoderCommand::Rewind);
        self.play();
    }
}

struct Engine {
    frames: FrameDecoder,
    soundtrack: Option<Soundtrack>,
    /// A play request is waiting for its first frame.
    awaiting_start: bool,
    events: mpsc::UnboundedSender<VideoEvent>,
}

impl Engine {
    fn on_command(&mut self, command: VideoCommand) {
        debug!(?command, "video command");
        match command {
            VideoCommand::Play => {
                self.awaiting_start = true;
                self.send_frames(FrameCommand::Play);
                if let Some(soundtrack) = &self.soundtrack {
                    soundtrack.play();
                }
            }
            VideoCommand::Pause => {
                self.awaiting_start = false;
                self.send_frames(FrameCommand::Pause);
                if let Some(soundtrack) = &self.soundtrack {
                    soundtrack.pause();
                }
            }
            VideoCommand::Replay => {
                self.awaiting_start = true;
                self.send_frames(FrameCommand::Rewind);
                self.send_frames(FrameCommand::Play);
                if let Some(soundtrack) = &self.soundtrack {
                    soundtrack.replay();
                }
            }
        }
    }

    fn on_frame_event(&mut self, event: FrameEvent) {
        match event {
            FrameEvent::Frame(frame) => {
                if std::mem::take(&mut self.awaiting_start) {
                    self.emit(VideoEvent::Started);
                }
                self.emit(VideoEvent::Frame(frame));
            }
            FrameEvent::EndOfStream => {
                self.awaiting_start = false;
                if let Some(soundtrack) = &self.soundtrack {
                    soundtrack.pause();
                }
                self.emit(VideoEvent::Ended);
            }
            FrameEvent::Failed(err) => {
                self.soundtrack = None;
                self.emit(VideoEvent::Failed(err));
            }
        }
    }

    fn on_sound_event(&mut self, event: DecoderEvent) {
        match event {
            DecoderEvent::Buffer(samples) => {
                if let Some(soundtrack) = &self.soundtrack {
                    let _ = soundtrack.output.send(OutputCommand::Queue(samples));
                }
            }
            DecoderEvent::Failed(err) => {
                debug!(error = %err, "video has no usable sound");
                self.soundtrack = None;
            }
            DecoderEvent::Opened { .. } | DecoderEvent::EndOfStream => {}
        }
    }

    fn send_frames(&self, command: FrameCommand) {
        if let Err(err) = self.frames.send(command) {
            debug!(?command, error = %err, "video decoder gone");
        }
    }

    fn emit(&self, event: VideoEvent) {
        let _ = self.events.send(event);
    }
}
