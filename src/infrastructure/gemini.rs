// SPDX-License-Identifier: MPL-2.0
//! Gemini REST client implementing [`StoryGenerator`].
//!
//! Sends one `generateContent` call per request with thinking disabled; the
//! reply text is the concatenation of the first candidate's text parts.

use crate::application::port::{StoryGenerator, StoryRequest};
use crate::error::StoryError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Upper bound on the story length requested from the model.
pub const STORY_MAX_WORDS: u32 = 40;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Connection settings for the Gemini API.
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiSettings {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    /// `None` makes every request fail with [`StoryError::MissingCredential`].
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    /// Creates a client. No request is made until a story is asked for.
    ///
    /// # Errors
    ///
    /// Returns [`StoryError::Network`] if the HTTP client cannot be built.
    pub fn new(settings: GeminiSettings) -> Result<Self, StoryError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("WonderLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoryError::Network(e.to_string()))?;
        Ok(Self { client, settings })
    }

    #[must_use]
    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }
}

impl StoryGenerator for GeminiClient {
    async fn generate(&self, request: &StoryRequest) -> Result<String, StoryError> {
        let Some(key) = self.settings.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return Err(StoryError::MissingCredential);
        };

        let body = GenerateRequest::new(&build_prompt(request), self.settings.temperature);
        debug!(id = %request.id, model = %self.settings.model, "requesting story");

        let response = self
            .client
            .post(self.url())
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| StoryError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoryError::Api(format!("HTTP status: {status}")));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| StoryError::Api(e.without_url().to_string()))?;
        reply.text().ok_or(StoryError::EmptyResponse)
    }
}

/// Prompt asking for a short, cheerful story about one memory.
#[must_use]
pub fn build_prompt(request: &StoryRequest) -> String {
    format!(
        "You are a magical storyteller for a 10-year-old's memory album.\n\
         Write a short, whimsical, and fun one-paragraph story (max {STORY_MAX_WORDS} words) \
         about a memory titled \"{}\" which happened on {}.\n\
         The memory is a {}.\n\
         Make it sound exciting and positive, and use appropriate emojis to make it pop! ✨",
        request.title,
        request.date,
        request.kind.label().to_lowercase()
    )
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn new(prompt: &str, temperature: f32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Text of the first candidate, `None` when it has none.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
