// SPDX-License-Identifier: MPL-2.0
//! Background music output port definition.
//!
//! This module defines the [`MusicOutput`] trait, the single audio sink the
//! background music controller drives. The infrastructure adapter is the
//! `FFmpeg` + `cpal` engine; tests use a recording fake.
//!
//! # Design Notes
//!
//! - Only [`MusicOutput::play`] can fail synchronously; every other command
//!   is fire-and-forget
//! - A later, asynchronous refusal is reported by the engine as an event and
//!   handled by the controller exactly like a synchronous one
//! - Uses domain types only ([`Volume`], [`AudioError`])

use crate::domain::music::Volume;
use crate::error::AudioError;

// =============================================================================
// MusicOutput Trait
// =============================================================================

/// Port for the one audio output that plays background tracks.
///
/// # Lifecycle
///
/// 1. [`load`](MusicOutput::load) a track url (positioned at 0, not playing)
/// 2. [`play`](MusicOutput::play) / [`pause`](MusicOutput::pause) as the
///    ducking rule dictates
/// 3. [`restart`](MusicOutput::restart) when the track reached its end
pub trait MusicOutput {
    /// Replaces the current source. Playback stops and the position is 0.
    fn load(&mut self, url: &str);

    /// Starts or resumes sound.
    ///
    /// # Errors
    ///
    /// Returns an [`AudioError`] when the platform refuses to start playback.
    fn play(&mut self) -> Result<(), AudioError>;

    /// Pauses sound, keeping the position.
    fn pause(&mut self);

    /// Seeks back to position 0, keeping the play/pause state.
    fn restart(&mut self);

    /// Sets the output volume.
    fn set_volume(&mut self, volume: Volume);
}
