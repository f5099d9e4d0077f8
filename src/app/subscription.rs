// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native keyboard and window events to the slideshow, drives the
//! slide countdown with display frames and forwards music and video engine
//! events.

use super::Message;
use crate::infrastructure::{music_playback, video_playback, VideoSession};
use crate::playback::{slideshow, CountdownId, KeyInput};
use iced::keyboard::{self, key::Named, Key};
use iced::{event, window, Subscription};

/// Keyboard shortcuts and window discovery.
///
/// Keys are always routed; the coordinator ignores them while the viewer is
/// closed. Events already captured by a widget are skipped.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match &event {
        event::Event::Window(
            window::Event::Opened { .. } | window::Event::Focused | window::Event::Resized(_),
        ) => Some(Message::WindowSeen(window_id)),
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            if status == event::Status::Captured {
                return None;
            }
            key_input(key).map(|input| Message::Slideshow(slideshow::Message::Key(input)))
        }
        _ => None,
    })
}

fn key_input(key: &Key) -> Option<KeyInput> {
    match key.as_ref() {
        Key::Named(Named::Escape) => Some(KeyInput::Escape),
        Key::Named(Named::ArrowRight) => Some(KeyInput::Right),
        Key::Named(Named::ArrowLeft) => Some(KeyInput::Left),
        Key::Named(Named::Space) => Some(KeyInput::Space),
        _ => None,
    }
}

/// Display frames while a slide countdown is running.
///
/// Each countdown gets its own subscription identity, so frames scheduled by
/// a cancelled countdown stop arriving.
pub fn create_countdown_subscription(countdown: Option<CountdownId>) -> Subscription<Message> {
    match countdown {
        Some(id) => window::frames()
            .with(id)
            .map(|(countdown, _)| Message::Slideshow(slideshow::Message::Frame { countdown })),
        None => Subscription::none(),
    }
}

/// Background music engine events.
pub fn create_music_subscription() -> Subscription<Message> {
    music_playback().map(Message::MusicEngine)
}

/// Playback of the displayed video, tagged with its session.
pub fn create_video_subscription(session: Option<&VideoSession>) -> Subscription<Message> {
    match session {
        Some(session) => video_playback(session)
            .with(session.id)
            .map(|(session, event)| Message::Video { session, event }),
        None => Subscription::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lightbox_keys_are_recognised() {
        assert_eq!(
            key_input(&Key::Named(Named::Escape)),
            Some(KeyInput::Escape)
        );
        assert_eq!(
            key_input(&Key::Named(Named::ArrowRight)),
            Some(KeyInput::Right)
        );
        assert_eq!(
            key_input(&Key::Named(Named::ArrowLeft)),
            Some(KeyInput::Left)
        );
        assert_eq!(key_input(&Key::Named(Named::Space)), Some(KeyInput::Space));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(key_input(&Key::Named(Named::Enter)), None);
        assert_eq!(key_input(&Key::Character("a".into())), None);
    }
}
