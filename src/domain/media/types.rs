// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.

use std::fmt;

/// Stable identity of a memory in the album (e.g. `p0`, `v3`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(String);

impl MediaId {
    /// Creates an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MediaId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// What a memory is, together with the data only that kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    /// Still picture shown as-is.
    Photo,
    /// Moving picture with its own sound track.
    Video {
        /// Still frame shown in the grid and before playback starts.
        thumbnail: String,
    },
}

impl MediaKind {
    /// Returns true for videos.
    #[must_use]
    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::Video { .. })
    }

    /// Returns the fieldless tag of this kind.
    #[must_use]
    pub fn tag(&self) -> MediaKindTag {
        match self {
            MediaKind::Photo => MediaKindTag::Photo,
            MediaKind::Video { .. } => MediaKindTag::Video,
        }
    }
}

/// Kind of a memory without the kind-specific payload.
///
/// Cheap to copy around between the slideshow and the music controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKindTag {
    Photo,
    Video,
}

impl MediaKindTag {
    /// Upper-case label used in prompts and catalog files.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MediaKindTag::Photo => "PHOTO",
            MediaKindTag::Video => "VIDEO",
        }
    }
}

/// A single memory in the album. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    id: MediaId,
    kind: MediaKind,
    url: String,
    title: String,
    date: String,
    description: Option<String>,
}

impl MediaItem {
    /// Creates a photo memory.
    #[must_use]
    pub fn photo(
        id: impl Into<MediaId>,
        url: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: MediaKind::Photo,
            url: url.into(),
            title: title.into(),
            date: date.into(),
            description: None,
        }
    }

    /// Creates a video memory.
    ///
    /// Without an explicit thumbnail, one is derived from the video url
    /// (see [`thumbnail_for_video`]).
    #[must_use]
    pub fn video(
        id: impl Into<MediaId>,
        url: impl Into<String>,
        thumbnail: Option<String>,
        title: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let thumbnail = thumbnail.unwrap_or_else(|| thumbnail_for_video(&url));
        Self {
            id: id.into(),
            kind: MediaKind::Video { thumbnail },
            url,
            title: title.into(),
            date: date.into(),
            description: None,
        }
    }

    /// Attaches a pre-written description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &MediaId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> &MediaKind {
        &self.kind
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns true if this memory is a video.
    #[must_use]
    pub fn is_video(&self) -> bool {
        self.kind.is_video()
    }

    /// Url of the still picture that represents this memory in the grid.
    #[must_use]
    pub fn preview_url(&self) -> &str {
        match &self.kind {
            MediaKind::Photo => &self.url,
            MediaKind::Video { thumbnail } => thumbnail,
        }
    }
}

/// Derives a still-frame url from a video url.
///
/// The extension of the last path segment is replaced by `.jpg`; when the
/// segment has no extension, `.jpg` is appended (media CDNs serve a frame
/// of the video at that address).
#[must_use]
pub fn thumbnail_for_video(url: &str) -> String {
    let segment_start = url.rfind('/').map_or(0, |i| i + 1);
    match url[segment_start..].rfind('.') {
        Some(dot) => format!("{}.jpg", &url[..segment_start + dot]),
        None => format!("{url}.jpg"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_tags() {
        assert_eq!(MediaKind::Photo.tag(), MediaKindTag::Photo);
        let video = MediaKind::Video {
            thumbnail: "t.jpg".into(),
        };
        assert_eq!(video.tag(), MediaKindTag::Video);
        assert!(video.is_video());
        assert!(!MediaKind::Photo.is_video());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(MediaKindTag::Photo.label(), "PHOTO");
        assert_eq!(MediaKindTag::Video.label(), "VIDEO");
    }

    #[test]
    fn test_photo_preview_is_its_url() {
        let item = MediaItem::photo("p0", "https://cdn/p0.jpg", "MEMORY #1", "OCT 2023");
        assert_eq!(item.preview_url(), "https://cdn/p0.jpg");
        assert!(item.description().is_none());
    }

    #[test]
    fn test_video_without_thumbnail_derives_one() {
        let item = MediaItem::video("v0", "https://cdn/clip.mp4", None, "VIDEO", "OCT 2023");
        assert_eq!(item.preview_url(), "https://cdn/clip.jpg");
    }

    #[test]
    fn test_video_keeps_explicit_thumbnail() {
        let item = MediaItem::video(
            "v0",
            "https://cdn/clip.mp4",
            Some("https://cdn/poster.png".into()),
            "VIDEO",
            "OCT 2023",
        );
        assert_eq!(item.preview_url(), "https://cdn/poster.png");
    }

    #[test]
    fn test_thumbnail_appends_when_no_extension() {
        assert_eq!(
            thumbnail_for_video("https://res.example.com/v.1/upload/MVI_3048"),
            "https://res.example.com/v.1/upload/MVI_3048.jpg"
        );
    }

    #[test]
    fn test_with_description() {
        let item = MediaItem::photo("p1", "u", "t", "d").with_description("A moment");
        assert_eq!(item.description(), Some("A moment"));
    }
}
