// SPDX-License-Identifier: MPL-2.0
//! Iced subscription for the background music engine.
//!
//! Starts the engine thread once, hands its [`MusicHandle`] to the UI with
//! [`MusicEvent::Ready`] and forwards every engine event afterwards.

use super::engine::{run_engine, MusicEvent, MusicHandle};
use crate::error::AudioError;
use iced::futures::{SinkExt, Stream};
use iced::{stream, Subscription};
use tokio::sync::mpsc;

/// Subscription delivering background music events.
#[must_use]
pub fn music_playback() -> Subscription<MusicEvent> {
    Subscription::run(music_engine)
}

fn music_engine() -> impl Stream<Item = MusicEvent> {
    stream::channel(100, move |mut output| async move {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let spawned = std::thread::Builder::new()
            .name("music-engine".to_string())
            .spawn(move || run_engine(command_rx, event_tx));
        if let Err(e) = spawned {
            let _ = output
                .send(MusicEvent::Unavailable(AudioError::Rejected(format!(
                    "failed to spawn music engine: {e}"
                ))))
                .await;
            return;
        }

        if output
            .send(MusicEvent::Ready(MusicHandle::new(command_tx)))
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
