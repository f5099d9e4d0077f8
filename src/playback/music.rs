// SPDX-License-Identifier: MPL-2.0
//! Background music controller.
//!
//! Keeps the user's wish for music (`intent_on`) apart from whether music is
//! actually sounding. The latter is derived by [`should_sound`] and
//! re-evaluated after every change of intent, track or displayed memory:
//! music is ducked while a video is on screen.
//!
//! A track that reaches its end starts over; the playlist never advances by
//! itself.

use crate::application::port::MusicOutput;
use crate::domain::media::MediaKindTag;
use crate::domain::music::{Track, Volume};
use crate::domain::ui::ProgressPercent;
use crate::error::AudioError;
use std::time::Duration;
use tracing::{debug, warn};

/// Whether background music should be audible.
///
/// True when the user wants music and no video is being viewed.
#[must_use]
pub fn should_sound(intent_on: bool, viewed: Option<MediaKindTag>) -> bool {
    intent_on && viewed != Some(MediaKindTag::Video)
}

/// Controller for the background music output.
#[derive(Debug)]
pub struct BackgroundMusic<O> {
    output: O,
    tracks: Vec<Track>,
    track_index: usize,
    intent_on: bool,
    viewed: Option<MediaKindTag>,
    sounding: bool,
    progress: ProgressPercent,
    volume: Volume,
}

impl<O: MusicOutput> BackgroundMusic<O> {
    /// Creates the controller and loads the starting track.
    ///
    /// `start_track` is clamped into the playlist range. Music starts with
    /// intent off. An empty playlist leaves the output unloaded.
    pub fn new(mut output: O, tracks: Vec<Track>, start_track: usize, volume: Volume) -> Self {
        let track_index = start_track.min(tracks.len().saturating_sub(1));
        output.set_volume(volume);
        if let Some(track) = tracks.get(track_index) {
            output.load(track.url());
        }
        Self {
            output,
            tracks,
            track_index,
            intent_on: false,
            viewed: None,
            sounding: false,
            progress: ProgressPercent::ZERO,
            volume,
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Flips the user's wish for music.
    ///
    /// Must be called from a direct user gesture so that the platform lets
    /// sound start.
    pub fn toggle_intent(&mut self) {
        self.intent_on = !self.intent_on;
        debug!(intent_on = self.intent_on, "music intent toggled");
        self.reconcile();
    }

    /// Turns the intent on if it is off; used by "Play all".
    pub fn ensure_intent_on(&mut self) {
        if !self.intent_on {
            self.toggle_intent();
        }
    }

    /// Plays track `index` from the start and turns the intent on.
    ///
    /// Out-of-range indices are ignored.
    pub fn select_track(&mut self, index: usize) {
        if index >= self.tracks.len() {
            warn!(index, count = self.tracks.len(), "track index out of range");
            return;
        }
        self.intent_on = true;
        self.switch_to(index);
    }

    /// Moves to the next track, wrapping around. Intent is unchanged.
    pub fn advance_track(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.switch_to((self.track_index + 1) % self.tracks.len());
    }

    /// Records the playback position reported by the output.
    ///
    /// Ignored while the duration is unknown.
    pub fn on_progress_tick(&mut self, position: Duration, duration: Option<Duration>) {
        let Some(duration) = duration.filter(|d| !d.is_zero()) else {
            return;
        };
        self.progress = ProgressPercent::from_ratio(position.as_secs_f64(), duration.as_secs_f64());
    }

    /// The loaded track reached its end: start it over.
    pub fn on_track_ended(&mut self) {
        debug!(track = self.current_track_title(), "track looped");
        self.output.restart();
        self.progress = ProgressPercent::ZERO;
    }

    /// The displayed memory changed (`None` when the viewer closed).
    pub fn set_viewed_kind(&mut self, viewed: Option<MediaKindTag>) {
        if self.viewed != viewed {
            self.viewed = viewed;
            self.reconcile();
        }
    }

    /// The output refused to play, synchronously or later on.
    ///
    /// The intent is kept so the next user gesture can retry.
    pub fn on_playback_rejected(&mut self, error: &AudioError) {
        warn!(
            track = self.current_track_title(),
            error = %error,
            "background music could not start"
        );
        self.sounding = false;
    }

    /// Re-applies the ducking rule, e.g. once the output became ready.
    pub fn resync(&mut self) {
        self.sounding = false;
        self.reconcile();
    }

    pub fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
        self.output.set_volume(volume);
    }

    fn switch_to(&mut self, index: usize) {
        self.track_index = index;
        self.progress = ProgressPercent::ZERO;
        self.sounding = false;
        if let Some(track) = self.tracks.get(index) {
            debug!(track = track.title(), "track loaded");
            self.output.load(track.url());
        }
        self.reconcile();
    }

    fn reconcile(&mut self) {
        let want = should_sound(self.intent_on, self.viewed);
        if want && !self.sounding {
            match self.output.play() {
                Ok(()) => self.sounding = true,
                Err(err) => self.on_playback_rejected(&err),
            }
        } else if !want && self.sounding {
            self.output.pause();
            self.sounding = false;
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn intent_on(&self) -> bool {
        self.intent_on
    }

    /// Whether sound is believed to be audible right now.
    #[must_use]
    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    #[must_use]
    pub fn progress(&self) -> ProgressPercent {
        self.progress
    }

    #[must_use]
    pub fn track_index(&self) -> usize {
        self.track_index
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[must_use]
    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.track_index)
    }

    fn current_track_title(&self) -> &str {
        self.current_track().map_or("", Track::title)
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Load(String),
        Play,
        Pause,
        Restart,
        Volume(f32),
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call>,
        reject: bool,
    }

    impl MusicOutput for Recorder {
        fn load(&mut self, url: &str) {
            self.calls.push(Call::Load(url.to_string()));
        }

        fn play(&mut self) -> Result<(), AudioError> {
            self.calls.push(Call::Play);
            if self.reject {
                Err(AudioError::Rejected("not allowed".into()))
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.calls.push(Call::Pause);
        }

        fn restart(&mut self) {
            self.calls.push(Call::Restart);
        }

        fn set_volume(&mut self, volume: Volume) {
            self.calls.push(Call::Volume(volume.value()));
        }
    }

    fn tracks() -> Vec<Track> {
        vec![Track::new("A", "a.mp3"), Track::new("B", "b.mp3")]
    }

    fn music() -> BackgroundMusic<Recorder> {
        BackgroundMusic::new(Recorder::default(), tracks(), 0, Volume::default())
    }

    #[test]
    fn ducking_rule() {
        assert!(!should_sound(false, None));
        assert!(should_sound(true, None));
        assert!(should_sound(true, Some(MediaKindTag::Photo)));
        assert!(!should_sound(true, Some(MediaKindTag::Video)));
        assert!(!should_sound(false, Some(MediaKindTag::Photo)));
    }

    #[test]
    fn new_loads_start_track_and_volume() {
        let m = BackgroundMusic::new(Recorder::default(), tracks(), 1, Volume::new(0.2));
        assert_eq!(m.track_index(), 1);
        assert_eq!(
            m.output().calls,
            vec![Call::Volume(0.2), Call::Load("b.mp3".into())]
        );
        assert!(!m.intent_on());
        assert!(!m.is_sounding());
    }

    #[test]
    fn start_track_past_the_end_is_clamped() {
        let m = BackgroundMusic::new(Recorder::default(), tracks(), 2, Volume::default());
        assert_eq!(m.track_index(), 1);
        assert_eq!(m.output().calls.last(), Some(&Call::Load("b.mp3".into())));

        let m = BackgroundMusic::new(Recorder::default(), Vec::new(), 5, Volume::default());
        assert_eq!(m.track_index(), 0);
        assert!(!m.output().calls.iter().any(|c| matches!(c, Call::Load(_))));
    }

    #[test]
    fn toggle_starts_and_stops_sound() {
        let mut m = music();
        m.toggle_intent();
        assert!(m.intent_on());
        assert!(m.is_sounding());
        m.toggle_intent();
        assert!(!m.intent_on());
        assert!(!m.is_sounding());
        assert_eq!(m.output().calls.last(), Some(&Call::Pause));
    }

    #[test]
    fn rejection_keeps_intent_for_retry() {
        let mut m = music();
        m.output_mut().reject = true;
        m.toggle_intent();
        assert!(m.intent_on());
        assert!(!m.is_sounding());

        m.output_mut().reject = false;
        m.resync();
        assert!(m.is_sounding());
    }

    #[test]
    fn async_rejection_is_handled_like_sync() {
        let mut m = music();
        m.toggle_intent();
        m.on_playback_rejected(&AudioError::Rejected("device lost".into()));
        assert!(m.intent_on());
        assert!(!m.is_sounding());
    }

    #[test]
    fn video_ducks_and_photo_resumes() {
        let mut m = music();
        m.toggle_intent();
        m.set_viewed_kind(Some(MediaKindTag::Video));
        assert!(!m.is_sounding());
        assert!(m.intent_on());
        m.set_viewed_kind(Some(MediaKindTag::Photo));
        assert!(m.is_sounding());
        m.set_viewed_kind(None);
        assert!(m.is_sounding());
    }

    #[test]
    fn select_track_forces_intent_and_restarts() {
        let mut m = music();
        m.on_progress_tick(Duration::from_secs(30), Some(Duration::from_secs(60)));
        m.select_track(1);
        assert_eq!(m.track_index(), 1);
        assert!(m.intent_on());
        assert!(m.is_sounding());
        assert_eq!(m.progress(), ProgressPercent::ZERO);
        let calls = &m.output().calls;
        assert_eq!(
            &calls[calls.len() - 2..],
            &[Call::Load("b.mp3".into()), Call::Play]
        );
    }

    #[test]
    fn select_track_out_of_range_is_ignored() {
        let mut m = music();
        m.select_track(9);
        assert_eq!(m.track_index(), 0);
        assert!(!m.intent_on());
    }

    #[test]
    fn advance_track_wraps_and_keeps_intent() {
        let mut m = music();
        m.advance_track();
        assert_eq!(m.track_index(), 1);
        assert!(!m.intent_on());
        assert!(!m.is_sounding());
        m.advance_track();
        assert_eq!(m.track_index(), 0);
    }

    #[test]
    fn progress_needs_known_duration() {
        let mut m = music();
        m.on_progress_tick(Duration::from_secs(5), None);
        assert_eq!(m.progress(), ProgressPercent::ZERO);
        m.on_progress_tick(Duration::from_secs(5), Some(Duration::ZERO));
        assert_eq!(m.progress(), ProgressPercent::ZERO);
        m.on_progress_tick(Duration::from_secs(15), Some(Duration::from_secs(60)));
        assert_abs_diff_eq!(m.progress().value(), 25.0, epsilon = 0.01);
    }

    #[test]
    fn track_end_loops_same_track() {
        let mut m = music();
        m.toggle_intent();
        m.on_progress_tick(Duration::from_secs(59), Some(Duration::from_secs(60)));
        m.on_track_ended();
        assert_eq!(m.track_index(), 0);
        assert_eq!(m.progress(), ProgressPercent::ZERO);
        assert_eq!(m.output().calls.last(), Some(&Call::Restart));
        assert!(m.is_sounding());
    }
}
