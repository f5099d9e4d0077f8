// SPDX-License-Identifier: MPL-2.0
//! Loading an album from a TOML catalog file.
//!
//! ```toml
//! [album]
//! title = "SUMMER"
//! subtitle = "2024"
//!
//! [[media]]
//! id = "beach"
//! kind = "photo"
//! url = "https://example.com/beach.jpg"
//! title = "BEACH"
//! date = "JUL 2024"
//!
//! [[media]]
//! id = "waves"
//! kind = "video"
//! url = "https://example.com/waves.mp4"
//! title = "WAVES"
//! date = "JUL 2024"
//!
//! [[tracks]]
//! title = "Tide"
//! url = "https://example.com/tide.mp3"
//! ```
//!
//! Missing `[album]` headings and an empty `[[tracks]]` list fall back to the
//! built-in ones.

use super::builtin::{self, ALBUM_SUBTITLE, ALBUM_TITLE};
use super::{Album, MediaCatalog};
use crate::domain::media::MediaItem;
use crate::domain::music::Track;
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
struct AlbumHeader {
    title: Option<String>,
    subtitle: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum KindRecord {
    Photo,
    Video,
}

#[derive(Debug, Deserialize)]
struct MediaRecord {
    id: String,
    kind: KindRecord,
    url: String,
    title: String,
    date: String,
    thumbnail: Option<String>,
    description: Option<String>,
}

impl From<MediaRecord> for MediaItem {
    fn from(record: MediaRecord) -> Self {
        let item = match record.kind {
            KindRecord::Photo => MediaItem::photo(record.id, record.url, record.title, record.date),
            KindRecord::Video => MediaItem::video(
                record.id,
                record.url,
                record.thumbnail,
                record.title,
                record.date,
            ),
        };
        match record.description {
            Some(description) => item.with_description(description),
            None => item,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TrackRecord {
    title: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    album: AlbumHeader,
    #[serde(default)]
    media: Vec<MediaRecord>,
    #[serde(default)]
    tracks: Vec<TrackRecord>,
}

/// Parses an album from TOML text.
///
/// # Errors
///
/// Returns an error if the text is not a valid catalog or two memories share
/// an id.
pub fn parse_album(content: &str) -> Result<Album> {
    let file: CatalogFile = toml::from_str(content)?;

    let catalog = MediaCatalog::new(file.media.into_iter().map(MediaItem::from).collect())?;
    let tracks: Vec<Track> = if file.tracks.is_empty() {
        builtin::builtin_album()?.tracks().to_vec()
    } else {
        file.tracks
            .into_iter()
            .map(|t| Track::new(t.title, t.url))
            .collect()
    };

    Ok(Album::new(
        file.album.title.unwrap_or_else(|| ALBUM_TITLE.to_string()),
        file.album
            .subtitle
            .unwrap_or_else(|| ALBUM_SUBTITLE.to_string()),
        catalog,
        tracks,
    )?)
}

/// Loads an album from a catalog file on disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_album(path: &Path) -> Result<Album> {
    let content = fs::read_to_string(path)?;
    parse_album(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::MediaKind;
    use crate::error::{CatalogError, Error};
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
[album]
title = "SUMMER"

[[media]]
id = "beach"
kind = "photo"
url = "https://example.com/beach.jpg"
title = "BEACH"
date = "JUL 2024"
description = "Sand everywhere."

[[media]]
id = "waves"
kind = "video"
url = "https://example.com/waves.mp4"
title = "WAVES"
date = "JUL 2024"

[[tracks]]
title = "Tide"
url = "https://example.com/tide.mp3"
"#;

    #[test]
    fn parses_media_tracks_and_headings() {
        let album = parse_album(SAMPLE).expect("valid catalog");
        assert_eq!(album.title(), "SUMMER");
        assert_eq!(album.subtitle(), ALBUM_SUBTITLE);
        assert_eq!(album.catalog().len(), 2);
        assert_eq!(album.tracks().len(), 1);
        assert_eq!(album.tracks()[0].title(), "Tide");

        let beach = album.catalog().get(&"beach".into()).expect("present");
        assert_eq!(beach.description(), Some("Sand everywhere."));
        assert!(!beach.is_video());
    }

    #[test]
    fn video_without_thumbnail_gets_fallback() {
        let album = parse_album(SAMPLE).expect("valid catalog");
        let waves = album.catalog().get(&"waves".into()).expect("present");
        match waves.kind() {
            MediaKind::Video { thumbnail } => {
                assert_eq!(thumbnail, "https://example.com/waves.jpg");
            }
            MediaKind::Photo => panic!("expected a video"),
        }
    }

    #[test]
    fn missing_tracks_use_builtin_playlist() {
        let album = parse_album("[[media]]\nid = \"a\"\nkind = \"photo\"\nurl = \"u\"\ntitle = \"t\"\ndate = \"d\"\n")
            .expect("valid catalog");
        assert_eq!(album.tracks().len(), 2);
    }

    #[test]
    fn empty_file_is_an_empty_album() {
        let album = parse_album("").expect("empty catalog is valid");
        assert!(album.catalog().is_empty());
        assert_eq!(album.title(), ALBUM_TITLE);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let content = format!("{SAMPLE}\n[[media]]\nid = \"beach\"\nkind = \"photo\"\nurl = \"u\"\ntitle = \"t\"\ndate = \"d\"\n");
        let err = parse_album(&content).expect_err("duplicate id");
        assert!(matches!(err, Error::Catalog(CatalogError::DuplicateId(ref id)) if id == "beach"));
    }

    #[test]
    fn unknown_kind_is_a_config_error() {
        let err = parse_album("[[media]]\nid = \"a\"\nkind = \"gif\"\nurl = \"u\"\ntitle = \"t\"\ndate = \"d\"\n")
            .expect_err("invalid kind");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn load_album_reads_from_disk() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("album.toml");
        std::fs::write(&path, SAMPLE).expect("write catalog");
        let album = load_album(&path).expect("load");
        assert_eq!(album.catalog().len(), 2);
    }

    #[test]
    fn load_album_missing_file_is_io_error() {
        let dir = tempdir().expect("temp dir");
        let err = load_album(&dir.path().join("missing.toml")).expect_err("missing");
        assert!(matches!(err, Error::Io(_)));
    }
}
