// SPDX-License-Identifier: MPL-2.0
//! Remote photo cache.
//!
//! Photos and video thumbnails are fetched over HTTP and kept as decoded
//! [`Handle`]s in an LRU keyed by url. Each url is fetched at most once while
//! it stays in the cache; a failed fetch is remembered so the card shows its
//! placeholder instead of retrying on every frame.

use crate::app::config::PHOTO_CACHE_CAPACITY;
use iced::widget::image::Handle;
use lru::LruCache;
use reqwest::header::ACCEPT;
use std::future::Future;
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::{debug, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Formats the image decoder understands; the CDN picks one of these.
const ACCEPTED_FORMATS: &str = "image/webp,image/jpeg,image/png;q=0.9";

/// What the cache knows about a url.
#[derive(Debug, Clone, Copy)]
pub enum PhotoState<'a> {
    /// Never requested, or evicted.
    Missing,
    Loading,
    Ready(&'a Handle),
    Failed,
}

#[derive(Debug, Clone)]
enum Slot {
    Loading,
    Ready(Handle),
    Failed,
}

/// LRU of decoded photos plus the HTTP client that fills it.
#[derive(Debug)]
pub struct PhotoCache {
    client: Option<reqwest::Client>,
    entries: LruCache<String, Slot>,
}

impl Default for PhotoCache {
    fn default() -> Self {
        Self::new(PHOTO_CACHE_CAPACITY)
    }
}

impl PhotoCache {
    /// Creates a cache holding at most `capacity` photos (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("WonderLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| warn!(error = %e, "photo downloads disabled"))
            .ok();
        Self {
            client,
            entries: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Marks `url` as loading and returns the download to run.
    ///
    /// Returns `None` when the url is already cached, loading or failed.
    pub fn begin(
        &mut self,
        url: &str,
    ) -> Option<impl Future<Output = Result<Handle, String>> + Send + 'static> {
        if self.entries.get(url).is_some() {
            return None;
        }
        self.entries.put(url.to_string(), Slot::Loading);
        debug!(url, "fetching photo");
        Some(fetch_photo(self.client.clone(), url.to_string()))
    }

    /// Stores the outcome of a download started by [`begin`](Self::begin).
    pub fn finish(&mut self, url: String, result: Result<Handle, String>) {
        let slot = match result {
            Ok(handle) => Slot::Ready(handle),
            Err(reason) => {
                warn!(%url, %reason, "photo could not be loaded");
                Slot::Failed
            }
        };
        self.entries.put(url, slot);
    }

    /// Looks up `url` without touching the recency order.
    #[must_use]
    pub fn get(&self, url: &str) -> PhotoState<'_> {
        match self.entries.peek(url) {
            None => PhotoState::Missing,
            Some(Slot::Loading) => PhotoState::Loading,
            Some(Slot::Ready(handle)) => PhotoState::Ready(handle),
            Some(Slot::Failed) => PhotoState::Failed,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Downloads `url` and wraps the encoded bytes in an image handle.
async fn fetch_photo(client: Option<reqwest::Client>, url: String) -> Result<Handle, String> {
    let client = client.ok_or_else(|| "HTTP client unavailable".to_string())?;
    let response = client
        .get(&url)
        .header(ACCEPT, ACCEPTED_FORMATS)
        .send()
        .await
        .map_err(|e| e.without_url().to_string())?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP status: {status}"));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| e.without_url().to_string())?;
    if bytes.is_empty() {
        return Err("empty body".to_string());
    }
    Ok(Handle::from_bytes(bytes.to_vec()))
}
