// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for UI values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// ProgressPercent
// =============================================================================

/// Progress through something, guaranteed to be within 0–100.
///
/// Used for both the per-slide countdown ring and the music progress bar.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ProgressPercent(f32);

impl ProgressPercent {
    /// No progress.
    pub const ZERO: Self = Self(0.0);
    /// Completed.
    pub const FULL: Self = Self(100.0);

    /// Creates a new progress value, clamping it to 0–100.
    ///
    /// NaN maps to zero.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        if percent.is_nan() {
            return Self::ZERO;
        }
        Self(percent.clamp(0.0, 100.0))
    }

    /// Progress of `part` through `whole`; zero when `whole` is not positive.
    #[must_use]
    pub fn from_ratio(part: f64, whole: f64) -> Self {
        if whole <= 0.0 || !whole.is_finite() {
            return Self::ZERO;
        }
        #[allow(clippy::cast_possible_truncation)]
        Self::new((100.0 * part / whole) as f32)
    }

    /// Returns the raw percentage value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns progress as a 0.0–1.0 fraction.
    #[must_use]
    pub fn as_fraction(self) -> f32 {
        self.0 / 100.0
    }

    /// Returns true when progress reached 100.
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= 100.0
    }
}

// =============================================================================
// Slide Duration Bounds
// =============================================================================

/// Per-slide duration bounds for the slideshow (in milliseconds).
pub mod slide_bounds {
    /// Minimum slide duration.
    pub const MIN_MS: u64 = 1_000;
    /// Maximum slide duration.
    pub const MAX_MS: u64 = 60_000;
    /// Default slide duration.
    pub const DEFAULT_MS: u64 = 3_000;
}

// =============================================================================
// SlideDuration
// =============================================================================

/// Time each photo stays on screen during autoplay (1 s – 60 s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideDuration(Duration);

impl SlideDuration {
    /// Creates a slide duration from milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(
            ms.clamp(slide_bounds::MIN_MS, slide_bounds::MAX_MS),
        ))
    }

    /// Returns the duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }

    /// Progress reached after `elapsed`, capped at 100.
    #[must_use]
    pub fn progress_after(self, elapsed: Duration) -> ProgressPercent {
        ProgressPercent::from_ratio(elapsed.as_secs_f64(), self.0.as_secs_f64())
    }
}

impl Default for SlideDuration {
    fn default() -> Self {
        Self(Duration::from_millis(slide_bounds::DEFAULT_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn progress_clamps_to_range() {
        assert_abs_diff_eq!(ProgressPercent::new(-5.0).value(), 0.0);
        assert_abs_diff_eq!(ProgressPercent::new(42.0).value(), 42.0);
        assert_abs_diff_eq!(ProgressPercent::new(250.0).value(), 100.0);
        assert_abs_diff_eq!(ProgressPercent::new(f32::NAN).value(), 0.0);
    }

    #[test]
    fn progress_from_ratio_ignores_unknown_whole() {
        assert_eq!(ProgressPercent::from_ratio(3.0, 0.0), ProgressPercent::ZERO);
        assert_eq!(
            ProgressPercent::from_ratio(3.0, f64::INFINITY),
            ProgressPercent::ZERO
        );
        assert_abs_diff_eq!(ProgressPercent::from_ratio(30.0, 120.0).value(), 25.0);
    }

    #[test]
    fn progress_fraction_and_completion() {
        assert_abs_diff_eq!(ProgressPercent::new(50.0).as_fraction(), 0.5);
        assert!(ProgressPercent::FULL.is_complete());
        assert!(!ProgressPercent::new(99.9).is_complete());
    }

    #[test]
    fn slide_duration_clamps_and_defaults() {
        assert_eq!(
            SlideDuration::default().as_duration(),
            Duration::from_millis(3000)
        );
        assert_eq!(
            SlideDuration::from_millis(10).as_duration(),
            Duration::from_millis(slide_bounds::MIN_MS)
        );
        assert_eq!(
            SlideDuration::from_millis(u64::MAX).as_duration(),
            Duration::from_millis(slide_bounds::MAX_MS)
        );
    }

    #[test]
    fn slide_progress_caps_at_full() {
        let slide = SlideDuration::default();
        assert_abs_diff_eq!(
            slide.progress_after(Duration::from_millis(1500)).value(),
            50.0,
            epsilon = 0.01
        );
        assert!(slide.progress_after(Duration::from_secs(10)).is_complete());
    }
}
