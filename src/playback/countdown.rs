// SPDX-License-Identifier: MPL-2.0
//! Per-slide countdown handle.
//!
//! A [`Countdown`] is owned by the slideshow coordinator and replaced or
//! dropped on every transition that invalidates it. Frame callbacks carry the
//! [`CountdownId`] of the countdown that scheduled them, so a callback that
//! outlives its countdown can be recognised and ignored.

use crate::domain::ui::{ProgressPercent, SlideDuration};
use std::time::{Duration, Instant};

/// Identity of one countdown run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountdownId(u64);

impl CountdownId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Hands out fresh countdown ids.
#[derive(Debug, Default)]
pub(crate) struct CountdownIds {
    next: u64,
}

impl CountdownIds {
    pub(crate) fn issue(&mut self) -> CountdownId {
        let id = CountdownId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// A running per-slide countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    id: CountdownId,
    started_at: Instant,
    duration: SlideDuration,
}

impl Countdown {
    pub(crate) fn start(id: CountdownId, started_at: Instant, duration: SlideDuration) -> Self {
        Self {
            id,
            started_at,
            duration,
        }
    }

    #[must_use]
    pub fn id(&self) -> CountdownId {
        self.id
    }

    /// Time elapsed at `now`; zero if `now` predates the start.
    #[must_use]
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// Progress at `now`, capped at 100.
    #[must_use]
    pub fn progress_at(&self, now: Instant) -> ProgressPercent {
        self.duration.progress_after(self.elapsed_at(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn ids_are_unique() {
        let mut ids = CountdownIds::default();
        let first = ids.issue();
        let second = ids.issue();
        assert_ne!(first, second);
        assert_eq!(second.value(), first.value() + 1);
    }

    #[test]
    fn progress_follows_elapsed_time() {
        let start = Instant::now();
        let countdown = Countdown::start(
            CountdownIds::default().issue(),
            start,
            SlideDuration::default(),
        );
        assert_abs_diff_eq!(countdown.progress_at(start).value(), 0.0);
        assert_abs_diff_eq!(
            countdown
                .progress_at(start + Duration::from_millis(750))
                .value(),
            25.0,
            epsilon = 0.01
        );
        assert!(countdown
            .progress_at(start + Duration::from_millis(3000))
            .is_complete());
    }

    #[test]
    fn time_before_start_counts_as_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let countdown = Countdown::start(
            CountdownIds::default().issue(),
            start,
            SlideDuration::default(),
        );
        assert_eq!(countdown.elapsed_at(Instant::now()), Duration::ZERO);
    }
}
