// SPDX-License-Identifier: MPL-2.0
//! Background music types.

/// Minimum music volume.
pub const MIN_VOLUME: f32 = 0.0;
/// Maximum music volume.
pub const MAX_VOLUME: f32 = 1.0;

/// A background music track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    title: String,
    url: String,
}

impl Track {
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Music volume, guaranteed to be within valid range (0.0–1.0).
///
/// # Example
///
/// ```
/// use wonder_lens::domain::music::Volume;
///
/// let vol = Volume::new(0.5);
/// assert_eq!(vol.value(), 0.5);
///
/// // Values outside range are clamped
/// assert_eq!(Volume::new(3.0).value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(MIN_VOLUME);
        }
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(0.5)
    }
}
