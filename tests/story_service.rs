// SPDX-License-Identifier: MPL-2.0
//! Story service wired to the Gemini client.

use wonder_lens::application::port::{StoryRequest, StoryService, StoryText};
use wonder_lens::domain::media::MediaItem;
use wonder_lens::infrastructure::{GeminiClient, GeminiSettings};

fn request() -> StoryRequest {
    StoryRequest::for_item(&MediaItem::photo(
        "p0",
        "https://img/p0.jpg",
        "MEMORY #1",
        "OCT 2023",
    ))
}

fn service(api_key: Option<&str>) -> StoryService<GeminiClient> {
    let client = GeminiClient::new(GeminiSettings {
        endpoint: "http://127.0.0.1:9".to_string(),
        model: "gemini-3-flash-preview".to_string(),
        temperature: 0.8,
        api_key: api_key.map(str::to_string),
    })
    .expect("client builds");
    StoryService::new(client)
}

#[tokio::test]
async fn gemini_without_key_asks_for_configuration() {
    let reply = service(None).tell(request()).await;
    assert_eq!(reply.id.as_str(), "p0");
    assert_eq!(reply.text, StoryText::Fallback("story-missing-key"));
}

#[tokio::test]
async fn unreachable_gemini_lets_the_memory_sleep() {
    let reply = service(Some("test-key")).tell(request()).await;
    assert_eq!(reply.id.as_str(), "p0");
    assert_eq!(reply.text, StoryText::Fallback("story-sleeping"));
}
