// SPDX-License-Identifier: MPL-2.0
//! Story generation port definition.
//!
//! A [`StoryGenerator`] turns a memory's title, date and kind into a short
//! whimsical caption. [`StoryService`] wraps any generator so callers always
//! get text back: either the story or a localized placeholder.

use crate::domain::media::{MediaId, MediaItem, MediaKindTag};
use crate::error::StoryError;
use std::future::Future;
use tracing::warn;

/// What a story is asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest {
    /// Memory the story belongs to; responses for other items are stale.
    pub id: MediaId,
    pub title: String,
    pub date: String,
    pub kind: MediaKindTag,
}

impl StoryRequest {
    /// Builds a request for a catalog item.
    #[must_use]
    pub fn for_item(item: &MediaItem) -> Self {
        Self {
            id: item.id().clone(),
            title: item.title().to_string(),
            date: item.date().to_string(),
            kind: item.kind().tag(),
        }
    }
}

/// Port for generative story backends.
///
/// The returned future must be `Send` so it can run on the async executor
/// behind an Iced `Task`.
pub trait StoryGenerator: Send + Sync {
    /// Generates a story for `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoryError`] when no credential is configured, the request
    /// fails, or the backend produces no text.
    fn generate(
        &self,
        request: &StoryRequest,
    ) -> impl Future<Output = Result<String, StoryError>> + Send;
}

/// Outcome of a story request, tagged with the memory it was made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryReply {
    pub id: MediaId,
    pub text: StoryText,
}

/// Text to display in the story panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryText {
    /// Text produced by the generator.
    Story(String),
    /// I18n key of the placeholder shown instead.
    Fallback(&'static str),
}

/// Never-failing front of a [`StoryGenerator`].
#[derive(Debug, Clone)]
pub struct StoryService<G> {
    generator: G,
}

impl<G: StoryGenerator> StoryService<G> {
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Asks the generator for a story, replacing failures by a placeholder.
    pub async fn tell(&self, request: StoryRequest) -> StoryReply {
        let text = match self.generator.generate(&request).await {
            Ok(story) if story.trim().is_empty() => {
                warn!(id = %request.id, "story generator returned blank text");
                StoryText::Fallback(StoryError::EmptyResponse.fallback_key())
            }
            Ok(story) => StoryText::Story(story.trim().to_string()),
            Err(err) => {
                warn!(id = %request.id, error = %err, "story generation fell back");
                StoryText::Fallback(err.fallback_key())
            }
        };
        StoryReply {
            id: request.id,
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(Result<String, StoryError>);

    impl StoryGenerator for Canned {
        async fn generate(&self, _request: &StoryRequest) -> Result<String, StoryError> {
            self.0.clone()
        }
    }

    fn request() -> StoryRequest {
        let item = MediaItem::photo("p3", "u", "MEMORY #4", "OCT 2023");
        StoryRequest::for_item(&item)
    }

    #[test]
    fn request_copies_item_fields() {
        let req = request();
        assert_eq!(req.id.as_str(), "p3");
        assert_eq!(req.title, "MEMORY #4");
        assert_eq!(req.kind, MediaKindTag::Photo);
    }

    #[tokio::test]
    async fn story_text_is_trimmed_and_tagged() {
        let service = StoryService::new(Canned(Ok("  Once upon a time ✨ \n".into())));
        let reply = service.tell(request()).await;
        assert_eq!(reply.id.as_str(), "p3");
        assert_eq!(reply.text, StoryText::Story("Once upon a time ✨".into()));
    }

    #[tokio::test]
    async fn failures_become_placeholders() {
        let service = StoryService::new(Canned(Err(StoryError::MissingCredential)));
        let reply = service.tell(request()).await;
        assert_eq!(reply.text, StoryText::Fallback("story-missing-key"));

        let service = StoryService::new(Canned(Err(StoryError::Network("refused".into()))));
        let reply = service.tell(request()).await;
        assert_eq!(reply.text, StoryText::Fallback("story-sleeping"));
    }

    #[tokio::test]
    async fn blank_story_is_faded() {
        let service = StoryService::new(Canned(Ok("   ".into())));
        let reply = service.tell(request()).await;
        assert_eq!(reply.text, StoryText::Fallback("story-faded"));
    }
}
