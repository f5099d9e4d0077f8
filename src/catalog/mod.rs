// SPDX-License-Identifier: MPL-2.0
//! Media catalog: the ordered, read-only list of memories and the playlist.
//!
//! The catalog order is the canonical browse order and is circular:
//! [`MediaCatalog::next`] after the last item yields the first one and
//! [`MediaCatalog::prev`] before the first yields the last.
//!
//! Lookups with an id that is not in the catalog return `None`; callers
//! always derive ids from catalog membership, so `None` is only reachable
//! through a programming error or a stale id.

pub mod builtin;
pub mod file;

use crate::domain::media::{MediaId, MediaItem};
use crate::domain::music::Track;
use crate::error::CatalogError;
use std::collections::HashMap;
use std::sync::Arc;

pub use builtin::builtin_album;
pub use file::load_album;

// =============================================================================
// MediaCatalog
// =============================================================================

/// Ordered list of memories with circular navigation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaCatalog {
    items: Vec<MediaItem>,
    positions: HashMap<MediaId, usize>,
}

impl MediaCatalog {
    /// Builds a catalog from items in browse order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two items share an id.
    pub fn new(items: Vec<MediaItem>) -> Result<Self, CatalogError> {
        let mut positions = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if positions.insert(item.id().clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(item.id().to_string()));
            }
        }
        Ok(Self { items, positions })
    }

    /// Returns the item at `index`, if any.
    #[must_use]
    pub fn item_at(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    /// Returns the position of `id` in browse order.
    #[must_use]
    pub fn index_of(&self, id: &MediaId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Returns the item with the given id.
    #[must_use]
    pub fn get(&self, id: &MediaId) -> Option<&MediaItem> {
        self.index_of(id).and_then(|index| self.items.get(index))
    }

    /// Returns the item following `id`, wrapping to the first one.
    #[must_use]
    pub fn next(&self, id: &MediaId) -> Option<&MediaItem> {
        let index = self.index_of(id)?;
        self.items.get((index + 1) % self.items.len())
    }

    /// Returns the item preceding `id`, wrapping to the last one.
    #[must_use]
    pub fn prev(&self, id: &MediaId) -> Option<&MediaItem> {
        let index = self.index_of(id)?;
        let len = self.items.len();
        self.items.get((index + len - 1) % len)
    }

    #[must_use]
    pub fn first(&self) -> Option<&MediaItem> {
        self.items.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the items in browse order.
    pub fn items(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }
}

// =============================================================================
// Album
// =============================================================================

/// Everything the gallery shows: headings, memories and background tracks.
///
/// Constructed once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    title: String,
    subtitle: String,
    catalog: Arc<MediaCatalog>,
    tracks: Vec<Track>,
}

impl Album {
    /// Assembles an album.
    ///
    /// An album without memories is allowed (the gallery shows its empty
    /// state), but the playlist must contain at least one track.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoTracks`] for an empty playlist.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        catalog: MediaCatalog,
        tracks: Vec<Track>,
    ) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::NoTracks);
        }
        Ok(Self {
            title: title.into(),
            subtitle: subtitle.into(),
            catalog: Arc::new(catalog),
            tracks,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    #[must_use]
    pub fn catalog(&self) -> &MediaCatalog {
        &self.catalog
    }

    /// Shared handle on the catalog for the slideshow coordinator.
    #[must_use]
    pub fn shared_catalog(&self) -> Arc<MediaCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
