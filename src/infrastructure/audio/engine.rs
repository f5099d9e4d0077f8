// SPDX-License-Identifier: MPL-2.0
//! Music engine thread.
//!
//! The cpal stream cannot leave the thread that created it, so the engine
//! owns a dedicated OS thread with a single-threaded Tokio runtime. It
//! receives [`MusicCommand`]s, drives one [`TrackDecoder`] at a time and
//! reports [`MusicEvent`]s back to the UI.

use super::decoder::{DecoderCommand, DecoderEvent, TrackDecoder};
use super::output::{AudioOutput, OutputCommand, OutputFormat};
use crate::domain::music::Volume;
use crate::error::AudioError;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// How often the playback position is reported.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// Commands accepted by the music engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MusicCommand {
    /// Replace the current track. Playback stops at position 0.
    Load(String),
    Play,
    Pause,
    /// Seek to the start, keeping the play/pause state.
    Restart,
    SetVolume(Volume),
}

/// Handle used by the UI to command the engine.
#[derive(Clone)]
pub struct MusicHandle {
    command_tx: mpsc::UnboundedSender<MusicCommand>,
}

impl MusicHandle {
    pub(crate) fn new(command_tx: mpsc::UnboundedSender<MusicCommand>) -> Self {
        Self { command_tx }
    }

    /// Sends a command to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::Rejected`] if the engine thread has stopped.
    pub fn send(&self, command: MusicCommand) -> Result<(), AudioError> {
        self.command_tx
            .send(command)
            .map_err(|_| AudioError::Rejected("music engine stopped".to_string()))
    }
}

impl std::fmt::Debug for MusicHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicHandle")
            .field("closed", &self.command_tx.is_closed())
            .finish()
    }
}

/// Events emitted by the music engine.
#[derive(Debug, Clone)]
pub enum MusicEvent {
    /// The engine thread is running and accepts commands.
    Ready(MusicHandle),
    /// No sound can be produced on this machine.
    Unavailable(AudioError),
    /// Position of the loaded track; `duration` is `None` until known.
    Progress {
        position: Duration,
        duration: Option<Duration>,
    },
    /// The loaded track played to its end.
    TrackEnded,
    /// The track could not be played after `Play` was accepted.
    PlaybackRejected(AudioError),
}

/// Runs the engine until the command channel closes. Blocks the caller.
pub(crate) fn run_engine(
    mut commands: mpsc::UnboundedReceiver<MusicCommand>,
    events: mpsc::UnboundedSender<MusicEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            let _ = events.send(MusicEvent::Unavailable(AudioError::Rejected(format!(
                "failed to start audio runtime: {e}"
            ))));
            return;
        }
    };

    runtime.block_on(async move {
        let output = match AudioOutput::new(Volume::default()) {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "background music unavailable");
                let _ = events.send(MusicEvent::Unavailable(err));
                return;
            }
        };
        let format = output.format();
        info!(
            sample_rate = format.sample_rate,
            channels = format.channels,
            "music engine started"
        );

        let mut engine = Engine {
            output,
            track: Track::default(),
            playing: false,
            duration: None,
            events,
        };
        let mut ticker = tokio::time::interval(PROGRESS_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => engine.on_command(command),
                    None => break,
                },
                event = next_decoder_event(&mut engine.track.decoder) => match event {
                    Some(event) => engine.on_decoder_event(event),
                    None => engine.track.close(),
                },
                _ = ticker.tick() => engine.report_progress(),
            }
        }
        debug!("music engine stopped");
    });
}

async fn next_decoder_event(decoder: &mut Option<TrackDecoder>) -> Option<DecoderEvent> {
    match decoder {
        Some(decoder) => decoder.recv_event().await,
        None => std::future::pending().await,
    }
}

/// The loaded track url and the decoder currently reading it.
///
/// The url outlives its decoder so a failed or finished decoder can be
/// reopened on the next `Play`.
#[derive(Default)]
struct Track {
    url: Option<String>,
    decoder: Option<TrackDecoder>,
}

impl Track {
    /// Replaces the track, stopping any previous decoder.
    fn load(&mut self, url: String, format: OutputFormat) {
        self.close();
        debug!(%url, "loading track");
        self.decoder = Some(TrackDecoder::spawn(url.clone(), format));
        self.url = Some(url);
    }

    /// Makes sure a decoder is running for the loaded url.
    ///
    /// Returns `true` when a new decoder had to be spawned.
    fn ensure_open(&mut self, format: OutputFormat) -> Result<bool, AudioError> {
        if self.decoder.is_some() {
            return Ok(false);
        }
        let url = self.url.clone().ok_or(AudioError::NotReady)?;
        info!(%url, "reopening track");
        self.decoder = Some(TrackDecoder::spawn(url, format));
        Ok(true)
    }

    fn close(&mut self) {
        if let Some(previous) = self.decoder.take() {
            let _ = previous.send(DecoderCommand::Stop);
        }
    }

    fn is_open(&self) -> bool {
        self.decoder.is_some()
    }
}

struct Engine {
    output: AudioOutput,
    track: Track,
    playing: bool,
    duration: Option<Duration>,
    events: mpsc::UnboundedSender<MusicEvent>,
}

impl Engine {
    fn on_command(&mut self, command: MusicCommand) {
        match command {
            MusicCommand::Load(url) => {
                self.send_output(OutputCommand::Pause);
                self.send_output(OutputCommand::Clear);
                self.playing = false;
                self.duration = None;
                self.track.load(url, self.output.format());
            }
            MusicCommand::Play => match self.track.ensure_open(self.output.format()) {
                Ok(reopened) => {
                    if reopened {
                        self.send_output(OutputCommand::Clear);
                    }
                    self.playing = true;
                    self.send_decoder(DecoderCommand::Play);
                    self.send_output(OutputCommand::Resume);
                }
                Err(err) => {
                    self.playing = false;
                    self.emit(MusicEvent::PlaybackRejected(err));
                }
            },
            MusicCommand::Pause => {
                self.playing = false;
                self.send_decoder(DecoderCommand::Pause);
                self.send_output(OutputCommand::Pause);
            }
            MusicCommand::Restart => {
                self.send_output(OutputCommand::Clear);
                if self.track.is_open() {
                    self.send_decoder(DecoderCommand::Rewind);
                } else if let Err(err) = self.track.ensure_open(self.output.format()) {
                    debug!(error = %err, "nothing to restart");
                }
                // The decoder pauses itself at the end of a track
                if self.playing {
                    self.send_decoder(DecoderCommand::Play);
                }
            }
            MusicCommand::SetVolume(volume) => self.send_output(OutputCommand::SetVolume(volume)),
        }
    }

    fn on_decoder_event(&mut self, event: DecoderEvent) {
        match event {
            DecoderEvent::Opened { duration } => {
                debug!(?duration, "track opened");
                self.duration = duration;
            }
            DecoderEvent::Buffer(samples) => self.send_output(OutputCommand::Queue(samples)),
            DecoderEvent::EndOfStream => self.emit(MusicEvent::TrackEnded),
            DecoderEvent::Failed(err) => {
                self.track.close();
                self.playing = false;
                self.emit(MusicEvent::PlaybackRejected(err));
            }
        }
    }

    fn report_progress(&self) {
        if self.playing && self.track.is_open() {
            self.emit(MusicEvent::Progress {
                position: self.output.position(),
                duration: self.duration,
            });
        }
    }

    fn send_decoder(&self, command: DecoderCommand) {
        match &self.track.decoder {
            Some(decoder) => {
                if let Err(err) = decoder.send(command) {
                    debug!(?command, error = %err, "decoder gone");
                }
            }
            None => debug!(?command, "no track loaded"),
        }
    }

    fn send_output(&self, command: OutputCommand) {
        if let Err(err) = self.output.send(command) {
            warn!(error = %err, "audio output command dropped");
        }
    }

    fn emit(&self, event: MusicEvent) {
        let _ = self.events.send(event);
    }
}
