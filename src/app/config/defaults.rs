// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Slideshow**: Slide duration bounds
//! - **Music**: Background music volume and starting track
//! - **Story**: Gemini model settings
//! - **Window**: Initial window geometry
//! - **Gallery**: Grid layout and photo cache

pub use crate::domain::ui::slide_bounds::{
    DEFAULT_MS as DEFAULT_SLIDE_DURATION_MS, MAX_MS as MAX_SLIDE_DURATION_MS,
    MIN_MS as MIN_SLIDE_DURATION_MS,
};

// ==========================================================================
// Music Defaults
// ==========================================================================

/// Default background music volume (0.0 to 1.0).
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.5;

/// Index of the track loaded at startup.
pub const DEFAULT_START_TRACK: usize = 0;

// ==========================================================================
// Story Defaults
// ==========================================================================

/// Gemini model used for stories.
pub const DEFAULT_STORY_MODEL: &str = "gemini-3-flash-preview";

/// Sampling temperature; slightly creative.
pub const DEFAULT_STORY_TEMPERATURE: f32 = 0.8;

/// Minimum sampling temperature accepted by the API.
pub const MIN_STORY_TEMPERATURE: f32 = 0.0;

/// Maximum sampling temperature accepted by the API.
pub const MAX_STORY_TEMPERATURE: f32 = 2.0;

/// Root of the Gemini REST API.
pub const DEFAULT_STORY_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables holding the API key, in lookup order.
pub const STORY_API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

// ==========================================================================
// Window Defaults
// ==========================================================================

/// Initial window width in logical pixels.
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Initial window height in logical pixels.
pub const DEFAULT_WINDOW_HEIGHT: f32 = 860.0;

/// Minimum window width in logical pixels.
pub const MIN_WINDOW_WIDTH: f32 = 640.0;

/// Minimum window height in logical pixels.
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Number of cards per gallery row.
pub const GALLERY_COLUMNS: usize = 3;

/// Maximum number of decoded photos kept in memory.
pub const PHOTO_CACHE_CAPACITY: usize = 96;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_duration_default_is_within_bounds() {
        assert!(MIN_SLIDE_DURATION_MS <= DEFAULT_SLIDE_DURATION_MS);
        assert!(DEFAULT_SLIDE_DURATION_MS <= MAX_SLIDE_DURATION_MS);
    }

    #[test]
    fn story_temperature_default_is_within_bounds() {
        assert!((MIN_STORY_TEMPERATURE..=MAX_STORY_TEMPERATURE)
            .contains(&DEFAULT_STORY_TEMPERATURE));
    }

    #[test]
    fn window_default_is_not_below_minimum() {
        assert!(DEFAULT_WINDOW_WIDTH >= MIN_WINDOW_WIDTH);
        assert!(DEFAULT_WINDOW_HEIGHT >= MIN_WINDOW_HEIGHT);
    }
}
