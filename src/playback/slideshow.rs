// SPDX-License-Identifier: MPL-2.0
//! Lightbox and slideshow coordinator.
//!
//! Owns the displayed memory, the autoplay flag, the per-slide progress and
//! the live [`Countdown`]. Time is passed in by the caller, which keeps every
//! transition deterministic under test.
//!
//! Rules enforced here:
//! - autoplay is never active while a video is displayed
//! - any manual navigation turns autoplay off
//! - every transition drops or replaces the countdown, and frames from a
//!   countdown that is no longer live are ignored

use super::countdown::{Countdown, CountdownId, CountdownIds};
use super::keys::KeyInput;
use crate::catalog::MediaCatalog;
use crate::domain::media::{MediaId, MediaItem, MediaKindTag};
use crate::domain::ui::{ProgressPercent, SlideDuration};
use crate::error::CatalogError;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Observable lightbox state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowState {
    /// Viewer closed, nothing displayed.
    Closed,
    /// A memory is displayed, no timed advance.
    Paused,
    /// A photo is displayed and the countdown is running.
    Autoplaying,
}

/// Messages for the slideshow coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ═══════════════════════════════════════════════════════════════════════
    // OPEN / CLOSE
    // ═══════════════════════════════════════════════════════════════════════
    /// Open the viewer on a memory.
    Open { id: MediaId, autoplay: bool },
    /// "Play all": open the first memory with autoplay.
    StartSlideshow,
    /// Close the viewer.
    Close,

    // ═══════════════════════════════════════════════════════════════════════
    // NAVIGATION
    // ═══════════════════════════════════════════════════════════════════════
    /// Show the next memory (manual).
    Next,
    /// Show the previous memory (manual).
    Previous,
    /// Toggle slideshow autoplay.
    ToggleAutoplay,
    /// Keyboard or pointer shortcut.
    Key(KeyInput),

    // ═══════════════════════════════════════════════════════════════════════
    // TIMING
    // ═══════════════════════════════════════════════════════════════════════
    /// Display refresh scheduled by the given countdown.
    Frame { countdown: CountdownId },
    /// The displayed video started playing.
    VideoPlaybackStarted,
}

/// Effects produced by coordinator transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// No visible change of item.
    None,
    /// A different memory is now displayed.
    ShowItem(MediaId),
    /// "Play all" opened the first memory; background music should be on.
    SlideshowStarted(MediaId),
    /// The viewer closed.
    Closed,
}

/// The lightbox state machine.
#[derive(Debug)]
pub struct SlideshowCoordinator {
    catalog: Arc<MediaCatalog>,
    slide_duration: SlideDuration,
    current: Option<MediaId>,
    autoplay: bool,
    progress: ProgressPercent,
    countdown: Option<Countdown>,
    ids: CountdownIds,
}

impl SlideshowCoordinator {
    #[must_use]
    pub fn new(catalog: Arc<MediaCatalog>, slide_duration: SlideDuration) -> Self {
        Self {
            catalog,
            slide_duration,
            current: None,
            autoplay: false,
            progress: ProgressPercent::ZERO,
            countdown: None,
            ids: CountdownIds::default(),
        }
    }

    /// Handles a coordinator message at time `now`.
    pub fn handle(&mut self, msg: Message, now: Instant) -> Effect {
        match msg {
            Message::Open { id, autoplay } => match self.open_on(&id, autoplay, now) {
                Ok(effect) => effect,
                Err(err) => {
                    warn!(error = %err, "cannot open lightbox");
                    Effect::None
                }
            },
            Message::StartSlideshow => self.start_slideshow(now),
            Message::Close => self.close(),
            Message::Next => self.go_next(),
            Message::Previous => self.go_prev(),
            Message::ToggleAutoplay => self.toggle_autoplay(now),
            Message::Key(key) => self.key(key, now),
            Message::Frame { countdown } => self.frame(countdown, now),
            Message::VideoPlaybackStarted => {
                self.video_playback_started();
                Effect::None
            }
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Opens the viewer on `id`.
    ///
    /// Autoplay requested on a video is not honoured: the viewer opens paused.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownId`] if `id` is not in the catalog.
    pub fn open_on(
        &mut self,
        id: &MediaId,
        autoplay: bool,
        now: Instant,
    ) -> Result<Effect, CatalogError> {
        let is_video = self
            .catalog
            .get(id)
            .ok_or_else(|| CatalogError::UnknownId(id.to_string()))?
            .is_video();
        self.current = Some(id.clone());
        self.autoplay = autoplay && !is_video;
        self.progress = ProgressPercent::ZERO;
        self.restart_countdown(now);
        debug!(%id, autoplay = self.autoplay, "lightbox opened");
        Ok(Effect::ShowItem(id.clone()))
    }

    /// Opens the first memory with autoplay. No-op on an empty catalog.
    pub fn start_slideshow(&mut self, now: Instant) -> Effect {
        let Some(first) = self.catalog.first().map(|item| item.id().clone()) else {
            debug!("slideshow requested on an empty catalog");
            return Effect::None;
        };
        match self.open_on(&first, true, now) {
            Ok(_) => Effect::SlideshowStarted(first),
            Err(_) => Effect::None,
        }
    }

    /// Closes the viewer. Closing a closed viewer does nothing.
    pub fn close(&mut self) -> Effect {
        self.countdown = None;
        self.autoplay = false;
        self.progress = ProgressPercent::ZERO;
        match self.current.take() {
            Some(id) => {
                debug!(%id, "lightbox closed");
                Effect::Closed
            }
            None => Effect::None,
        }
    }

    /// Shows the next memory and turns autoplay off.
    pub fn go_next(&mut self) -> Effect {
        let Some(target) = self.neighbour(MediaCatalog::next) else {
            return Effect::None;
        };
        self.show_manually(target)
    }

    /// Shows the previous memory and turns autoplay off.
    pub fn go_prev(&mut self) -> Effect {
        let Some(target) = self.neighbour(MediaCatalog::prev) else {
            return Effect::None;
        };
        self.show_manually(target)
    }

    /// Switches between paused and autoplaying.
    ///
    /// Does nothing while closed; refuses to start autoplay on a video.
    pub fn toggle_autoplay(&mut self, now: Instant) -> Effect {
        let Some(kind) = self.viewed_kind() else {
            return Effect::None;
        };
        if !self.autoplay && kind == MediaKindTag::Video {
            debug!("autoplay refused while a video is displayed");
            return Effect::None;
        }
        self.autoplay = !self.autoplay;
        self.progress = ProgressPercent::ZERO;
        self.restart_countdown(now);
        debug!(autoplay = self.autoplay, "autoplay toggled");
        Effect::None
    }

    /// Advances the live countdown to `now`.
    ///
    /// When the slide time is up, the next memory is shown; landing on a
    /// video stops autoplay.
    pub fn frame(&mut self, countdown: CountdownId, now: Instant) -> Effect {
        let progress = match &self.countdown {
            Some(live) if live.id() == countdown => live.progress_at(now),
            _ => {
                debug!(countdown = countdown.value(), "stale countdown frame ignored");
                return Effect::None;
            }
        };
        self.progress = progress;
        if !progress.is_complete() {
            return Effect::None;
        }

        let Some((target, is_video)) = self
            .current
            .as_ref()
            .and_then(|id| self.catalog.next(id))
            .map(|item| (item.id().clone(), item.is_video()))
        else {
            self.countdown = None;
            return Effect::None;
        };
        self.current = Some(target.clone());
        self.progress = ProgressPercent::ZERO;
        if is_video {
            self.autoplay = false;
        }
        self.restart_countdown(now);
        debug!(id = %target, autoplay = self.autoplay, "slideshow advanced");
        Effect::ShowItem(target)
    }

    /// The displayed video started playing; its own length replaces the timer.
    pub fn video_playback_started(&mut self) {
        if self.viewed_kind() == Some(MediaKindTag::Video) && self.autoplay {
            debug!("video playback took over from autoplay");
            self.autoplay = false;
            self.progress = ProgressPercent::ZERO;
            self.countdown = None;
        }
    }

    /// Applies a keyboard or pointer shortcut.
    pub fn key(&mut self, key: KeyInput, now: Instant) -> Effect {
        match key {
            KeyInput::Escape => self.close(),
            KeyInput::Right => self.go_next(),
            KeyInput::Left => self.go_prev(),
            KeyInput::Space => self.toggle_autoplay(now),
        }
    }

    fn neighbour(
        &self,
        step: for<'a> fn(&'a MediaCatalog, &MediaId) -> Option<&'a MediaItem>,
    ) -> Option<MediaId> {
        let current = self.current.as_ref()?;
        step(&self.catalog, current).map(|item| item.id().clone())
    }

    fn show_manually(&mut self, target: MediaId) -> Effect {
        self.current = Some(target.clone());
        self.autoplay = false;
        self.progress = ProgressPercent::ZERO;
        self.countdown = None;
        debug!(id = %target, "manual navigation");
        Effect::ShowItem(target)
    }

    fn restart_countdown(&mut self, now: Instant) {
        self.countdown = if self.autoplay && self.current.is_some() {
            Some(Countdown::start(self.ids.issue(), now, self.slide_duration))
        } else {
            None
        };
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> SlideshowState {
        match (&self.current, self.autoplay) {
            (None, _) => SlideshowState::Closed,
            (Some(_), false) => SlideshowState::Paused,
            (Some(_), true) => SlideshowState::Autoplaying,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay
    }

    /// The displayed memory, if the viewer is open.
    #[must_use]
    pub fn current(&self) -> Option<&MediaItem> {
        self.current.as_ref().and_then(|id| self.catalog.get(id))
    }

    #[must_use]
    pub fn current_id(&self) -> Option<&MediaId> {
        self.current.as_ref()
    }

    /// Kind of the displayed memory; feeds the music ducking rule.
    #[must_use]
    pub fn viewed_kind(&self) -> Option<MediaKindTag> {
        self.current().map(|item| item.kind().tag())
    }

    #[must_use]
    pub fn progress(&self) -> ProgressPercent {
        self.progress
    }

    /// Id of the live countdown, if autoplay is running.
    #[must_use]
    pub fn countdown_id(&self) -> Option<CountdownId> {
        self.countdown.as_ref().map(Countdown::id)
    }

    #[must_use]
    pub fn catalog(&self) -> &MediaCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn catalog() -> Arc<MediaCatalog> {
        Arc::new(
            MediaCatalog::new(vec![
                MediaItem::photo("p0", "u0", "MEMORY #1", "OCT 2023"),
                MediaItem::photo("p1", "u1", "MEMORY #2", "OCT 2023"),
                MediaItem::video("v0", "v0.mp4", None, "VIDEO MEMORY #1", "OCT 2023"),
            ])
            .expect("unique ids"),
        )
    }

    fn coordinator() -> SlideshowCoordinator {
        SlideshowCoordinator::new(catalog(), SlideDuration::default())
    }

    fn live(coordinator: &SlideshowCoordinator) -> CountdownId {
        coordinator.countdown_id().expect("countdown running")
    }

    #[test]
    fn starts_closed() {
        let c = coordinator();
        assert_eq!(c.state(), SlideshowState::Closed);
        assert!(c.current().is_none());
        assert!(c.countdown_id().is_none());
    }

    #[test]
    fn open_without_autoplay_is_paused() {
        let mut c = coordinator();
        let effect = c.open_on(&"p1".into(), false, Instant::now()).expect("known");
        assert_eq!(effect, Effect::ShowItem("p1".into()));
        assert_eq!(c.state(), SlideshowState::Paused);
        assert!(c.countdown_id().is_none());
    }

    #[test]
    fn open_with_autoplay_starts_countdown() {
        let mut c = coordinator();
        c.open_on(&"p0".into(), true, Instant::now()).expect("known");
        assert_eq!(c.state(), SlideshowState::Autoplaying);
        assert!(c.countdown_id().is_some());
    }

    #[test]
    fn open_video_with_autoplay_opens_paused() {
        let mut c = coordinator();
        c.open_on(&"v0".into(), true, Instant::now()).expect("known");
        assert_eq!(c.state(), SlideshowState::Paused);
        assert!(c.countdown_id().is_none());
    }

    #[test]
    fn open_unknown_id_fails() {
        let mut c = coordinator();
        let err = c.open_on(&"ghost".into(), false, Instant::now());
        assert_eq!(err, Err(CatalogError::UnknownId("ghost".into())));
        assert_eq!(c.state(), SlideshowState::Closed);
    }

    #[test]
    fn open_message_with_unknown_id_is_ignored() {
        let mut c = coordinator();
        let effect = c.handle(
            Message::Open {
                id: "ghost".into(),
                autoplay: true,
            },
            Instant::now(),
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(c.state(), SlideshowState::Closed);
    }

    #[test]
    fn close_twice_stays_closed() {
        let mut c = coordinator();
        c.open_on(&"p0".into(), true, Instant::now()).expect("known");
        assert_eq!(c.close(), Effect::Closed);
        assert_eq!(c.state(), SlideshowState::Closed);
        assert_eq!(c.close(), Effect::None);
        assert_eq!(c.state(), SlideshowState::Closed);
        assert!(c.countdown_id().is_none());
    }

    #[test]
    fn navigation_while_closed_is_noop() {
        let mut c = coordinator();
        assert_eq!(c.go_next(), Effect::None);
        assert_eq!(c.go_prev(), Effect::None);
        assert_eq!(c.toggle_autoplay(Instant::now()), Effect::None);
        assert_eq!(c.state(), SlideshowState::Closed);
    }

    #[test]
    fn manual_navigation_turns_autoplay_off() {
        let mut c = coordinator();
        c.open_on(&"p0".into(), true, Instant::now()).expect("known");
        assert_eq!(c.go_next(), Effect::ShowItem("p1".into()));
        assert_eq!(c.state(), SlideshowState::Paused);
        assert_eq!(c.progress(), ProgressPercent::ZERO);
        assert!(c.countdown_id().is_none());
    }

    #[test]
    fn previous_wraps_around() {
        let mut c = coordinator();
        c.open_on(&"p0".into(), false, Instant::now()).expect("known");
        assert_eq!(c.go_prev(), Effect::ShowItem("v0".into()));
    }

    #[test]
    fn toggle_restarts_countdown_from_zero() {
        let start = Instant::now();
        let mut c = coordinator();
        c.open_on(&"p0".into(), false, start).expect("known");

        c.toggle_autoplay(start);
        let first = live(&c);
        c.frame(first, start + Duration::from_millis(1500));
        assert!(c.progress().value() > 0.0);

        c.toggle_autoplay(start + Duration::from_millis(1600));
        assert_eq!(c.state(), SlideshowState::Paused);
        assert_eq!(c.progress(), ProgressPercent::ZERO);

        c.toggle_autoplay(start + Duration::from_millis(1700));
        assert_ne!(live(&c), first);
        assert_eq!(c.progress(), ProgressPercent::ZERO);
    }

    #[test]
    fn toggle_on_video_is_refused() {
        let mut c = coordinator();
        c.open_on(&"v0".into(), false, Instant::now()).expect("known");
        c.toggle_autoplay(Instant::now());
        assert_eq!(c.state(), SlideshowState::Paused);
    }

    #[test]
    fn frame_updates_progress_without_advancing() {
        let start = Instant::now();
        let mut c = coordinator();
        c.open_on(&"p0".into(), true, start).expect("known");
        let effect = c.frame(live(&c), start + Duration::from_millis(1500));
        assert_eq!(effect, Effect::None);
        assert!((c.progress().value() - 50.0).abs() < 0.1);
        assert_eq!(c.current_id(), Some(&"p0".into()));
    }

    #[test]
    fn stale_frame_is_ignored() {
        let start = Instant::now();
        let mut c = coordinator();
        c.open_on(&"p0".into(), true, start).expect("known");
        let stale = live(&c);
        c.go_next();
        c.toggle_autoplay(start);

        let effect = c.frame(stale, start + Duration::from_secs(10));
        assert_eq!(effect, Effect::None);
        assert_eq!(c.current_id(), Some(&"p1".into()));
        assert_eq!(c.progress(), ProgressPercent::ZERO);
    }

    #[test]
    fn countdown_advances_and_stops_on_video() {
        let start = Instant::now();
        let mut c = coordinator();
        c.open_on(&"p0".into(), true, start).expect("known");

        let t1 = start + Duration::from_millis(3000);
        assert_eq!(c.frame(live(&c), t1), Effect::ShowItem("p1".into()));
        assert_eq!(c.state(), SlideshowState::Autoplaying);
        assert_eq!(c.progress(), ProgressPercent::ZERO);

        let t2 = t1 + Duration::from_millis(3000);
        assert_eq!(c.frame(live(&c), t2), Effect::ShowItem("v0".into()));
        assert_eq!(c.state(), SlideshowState::Paused);
        assert!(c.countdown_id().is_none());
    }

    #[test]
    fn configured_slide_duration_is_used() {
        let start = Instant::now();
        let mut c = SlideshowCoordinator::new(catalog(), SlideDuration::from_millis(1000));
        c.open_on(&"p0".into(), true, start).expect("known");
        let effect = c.frame(live(&c), start + Duration::from_millis(1000));
        assert_eq!(effect, Effect::ShowItem("p1".into()));
    }

    #[test]
    fn keys_map_to_operations() {
        let now = Instant::now();
        let mut c = coordinator();
        c.open_on(&"p0".into(), false, now).expect("known");

        c.key(KeyInput::Space, now);
        assert_eq!(c.state(), SlideshowState::Autoplaying);
        c.key(KeyInput::Right, now);
        assert_eq!(c.current_id(), Some(&"p1".into()));
        c.key(KeyInput::Left, now);
        assert_eq!(c.current_id(), Some(&"p0".into()));
        assert_eq!(c.key(KeyInput::Escape, now), Effect::Closed);
        assert_eq!(c.state(), SlideshowState::Closed);
    }

    #[test]
    fn start_slideshow_opens_first_item() {
        let mut c = coordinator();
        let effect = c.start_slideshow(Instant::now());
        assert_eq!(effect, Effect::SlideshowStarted("p0".into()));
        assert_eq!(c.state(), SlideshowState::Autoplaying);
    }

    #[test]
    fn start_slideshow_on_empty_catalog_is_noop() {
        let mut c =
            SlideshowCoordinator::new(Arc::new(MediaCatalog::default()), SlideDuration::default());
        assert_eq!(c.start_slideshow(Instant::now()), Effect::None);
        assert_eq!(c.state(), SlideshowState::Closed);
    }

    #[test]
    fn video_playback_started_keeps_autoplay_off() {
        let mut c = coordinator();
        c.open_on(&"v0".into(), false, Instant::now()).expect("known");
        c.video_playback_started();
        assert_eq!(c.state(), SlideshowState::Paused);
        assert!(c.countdown_id().is_none());
    }
}
