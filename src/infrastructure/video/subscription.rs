// SPDX-License-Identifier: MPL-2.0
//! Iced subscription for video playback.
//!
//! Each [`VideoSession`] starts its own engine thread. Dropping the
//! subscription, by ending the session, closes the event channel and the
//! engine stops with it.

use super::engine::{run_video_engine, VideoEvent, VideoHandle};
use crate::error::VideoError;
use iced::futures::{SinkExt, Stream};
use iced::{stream, Subscription};
use tokio::sync::mpsc;

/// One playback of one video.
///
/// Showing the same video again starts a new session, so playback starts
/// over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoSession {
    pub id: u64,
    pub url: String,
}

/// Subscription delivering the events of `session`.
#[must_use]
pub fn video_playback(session: &VideoSession) -> Subscription<VideoEvent> {
    Subscription::run_with_id(session.clone(), video_engine(session.url.clone()))
}

fn video_engine(url: String) -> impl Stream<Item = VideoEvent> {
    stream::channel(100, move |mut output| async move {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let spawned = std::thread::Builder::new()
            .name("video-engine".to_string())
            .spawn(move || run_video_engine(url, command_rx, event_tx));
        if let Err(e) = spawned {
            let _ = output
                .send(VideoEvent::Failed(VideoError::DecodingFailed(format!(
                    "failed to spawn video engine: {e}"
                ))))
                .await;
            return;
        }

        if output
            .send(VideoEvent::Ready(VideoHandle::new(command_tx)))
            .await
            .is_err()
        {
            return;
        }

        while let Some(event) = event_rx.recv().await {
            if output.send(event).await.is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash(session: &VideoSession) -> u64 {
        let mut hasher = DefaultHasher::new();
        session.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn replaying_a_video_is_a_new_subscription() {
        let first = VideoSession {
            id: 1,
            url: "https://video/v0.mp4".into(),
        };
        let again = VideoSession {
            id: 2,
            ..first.clone()
        };
        assert_eq!(hash(&first), hash(&first.clone()));
        assert_ne!(hash(&first), hash(&again));
    }
}
