// SPDX-License-Identifier: MPL-2.0
//! [`MusicOutput`] adapter in front of the music engine.
//!
//! The controller is created before the engine thread has started, so the
//! player remembers the last loaded url and volume and replays them once a
//! [`MusicHandle`] is attached.

use super::engine::{MusicCommand, MusicHandle};
use crate::application::port::MusicOutput;
use crate::domain::music::Volume;
use crate::error::AudioError;
use tracing::debug;

#[derive(Debug, Default)]
pub struct MusicPlayer {
    handle: Option<MusicHandle>,
    unavailable: Option<AudioError>,
    loaded_url: Option<String>,
    volume: Volume,
}

impl MusicPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects the engine and replays the current volume and track.
    pub fn attach(&mut self, handle: MusicHandle) {
        let _ = handle.send(MusicCommand::SetVolume(self.volume));
        if let Some(url) = &self.loaded_url {
            let _ = handle.send(MusicCommand::Load(url.clone()));
        }
        self.unavailable = None;
        self.handle = Some(handle);
    }

    /// Records that no sound can be produced; later `play` calls fail with
    /// `error`.
    pub fn mark_unavailable(&mut self, error: AudioError) {
        self.handle = None;
        self.unavailable = Some(error);
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    #[must_use]
    pub fn loaded_url(&self) -> Option<&str> {
        self.loaded_url.as_deref()
    }

    fn send(&self, command: MusicCommand) -> Result<(), AudioError> {
        match &self.handle {
            Some(handle) => handle.send(command),
            None => {
                debug!(?command, "music engine not attached");
                Err(self.unavailable.clone().unwrap_or(AudioError::NotReady))
            }
        }
    }
}

impl MusicOutput for MusicPlayer {
    fn load(&mut self, url: &str) {
        self.loaded_url = Some(url.to_string());
        let _ = self.send(MusicCommand::Load(url.to_string()));
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.send(MusicCommand::Play)
    }

    fn pause(&mut self) {
        let _ = self.send(MusicCommand::Pause);
    }

    fn restart(&mut self) {
        let _ = self.send(MusicCommand::Restart);
    }

    fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
        let _ = self.send(MusicCommand::SetVolume(volume));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn drain(rx: &mut mpsc::UnboundedReceiver<MusicCommand>) -> Vec<MusicCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = rx.try_recv() {
            commands.push(command);
        }
        commands
    }

    #[test]
    fn play_before_attach_is_not_ready() {
        let mut player = MusicPlayer::new();
        assert_eq!(player.play(), Err(AudioError::NotReady));
    }

    #[test]
    fn attach_replays_volume_and_track() {
        let mut player = MusicPlayer::new();
        player.set_volume(Volume::new(0.3));
        player.load("a.mp3");
        player.load("b.mp3");

        let (tx, mut rx) = mpsc::unbounded_channel();
        player.attach(MusicHandle::new(tx));
        assert!(player.is_attached());
        assert_eq!(
            drain(&mut rx),
            vec![
                MusicCommand::SetVolume(Volume::new(0.3)),
                MusicCommand::Load("b.mp3".into()),
            ]
        );

        assert_eq!(player.play(), Ok(()));
        player.restart();
        player.pause();
        assert_eq!(
            drain(&mut rx),
            vec![MusicCommand::Play, MusicCommand::Restart, MusicCommand::Pause]
        );
    }

    #[test]
    fn unavailable_engine_rejects_play() {
        let mut player = MusicPlayer::new();
        player.mark_unavailable(AudioError::NoDevice);
        assert_eq!(player.play(), Err(AudioError::NoDevice));
        assert!(!player.is_attached());
    }

    #[test]
    fn stopped_engine_rejects_play() {
        let mut player = MusicPlayer::new();
        let (tx, rx) = mpsc::unbounded_channel();
        player.attach(MusicHandle::new(tx));
        drop(rx);
        assert!(matches!(player.play(), Err(AudioError::Rejected(_))));
    }
}
