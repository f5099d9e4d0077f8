// SPDX-License-Identifier: MPL-2.0
//! `FFmpeg` setup and wall-clock pacing shared by the music and video
//! decoders.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

static FFMPEG_INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// Initializes `FFmpeg` and its network layer once per process.
///
/// # Errors
///
/// Returns the initialization failure, on this and every later call.
pub fn init() -> Result<(), String> {
    FFMPEG_INIT
        .get_or_init(|| {
            ffmpeg_next::init().map_err(|e| format!("FFmpeg initialization failed: {e}"))?;
            ffmpeg_next::format::network::init();
            // SAFETY: av_log_set_level is thread-safe and only affects logging
            unsafe {
                ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
            }
            Ok(())
        })
        .clone()
}

/// Paces decoded output against the wall clock.
///
/// The first timestamp seen after [`play`](Self::play) is the reference;
/// later ones are released when their offset from it has elapsed, minus
/// `lookahead`.
#[derive(Debug)]
pub struct Pacing {
    is_playing: bool,
    lookahead_secs: f64,
    started_at: Option<Instant>,
    first_pts: Option<f64>,
}

impl Pacing {
    #[must_use]
    pub fn new(lookahead: Duration) -> Self {
        Self {
            is_playing: false,
            lookahead_secs: lookahead.as_secs_f64(),
            started_at: None,
            first_pts: None,
        }
    }

    pub fn play(&mut self) {
        self.is_playing = true;
        self.started_at = Some(Instant::now());
        self.first_pts = None;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
        self.started_at = None;
        self.first_pts = None;
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// How long to wait before handing over output stamped `pts_secs`.
    pub fn delay_for(&mut self, pts_secs: f64) -> Option<Duration> {
        let started_at = self.started_at?;
        let first = *self.first_pts.get_or_insert(pts_secs);
        let offset = pts_secs - first - self.lookahead_secs;
        if offset <= 0.0 {
            return None;
        }
        let target = started_at + Duration::from_secs_f64(offset);
        target.checked_duration_since(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOOKAHEAD: Duration = Duration::from_millis(200);

    #[test]
    fn pacing_does_not_wait_within_lookahead() {
        let mut pacing = Pacing::new(LOOKAHEAD);
        pacing.play();
        assert!(pacing.delay_for(10.0).is_none());
        assert!(pacing.delay_for(10.1).is_none());
    }

    #[test]
    fn pacing_waits_for_output_ahead_of_time() {
        let mut pacing = Pacing::new(LOOKAHEAD);
        pacing.play();
        pacing.delay_for(0.0);
        let wait = pacing.delay_for(2.0).expect("buffer is ahead");
        assert!(wait > Duration::from_millis(1500));
        assert!(wait <= Duration::from_millis(1800));
    }

    #[test]
    fn frames_without_lookahead_wait_their_full_offset() {
        let mut pacing = Pacing::new(Duration::ZERO);
        pacing.play();
        assert!(pacing.delay_for(1.0).is_none());
        let wait = pacing.delay_for(1.5).expect("frame is ahead");
        assert!(wait > Duration::from_millis(400));
        assert!(wait <= Duration::from_millis(500));
    }

    #[test]
    fn paused_pacing_never_waits() {
        let mut pacing = Pacing::new(LOOKAHEAD);
        pacing.play();
        pacing.pause();
        assert!(!pacing.is_playing());
        assert!(pacing.delay_for(5.0).is_none());
    }

    #[test]
    fn init_is_idempotent() {
        assert_eq!(init(), init());
    }
}
