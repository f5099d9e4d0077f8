// SPDX-License-Identifier: MPL-2.0
//! Video memory shown in the lightbox.
//!
//! Holds the playback session of the displayed video, its latest frame and
//! the play/pause state. Events are tagged with their session; events of a
//! video the user already left are dropped.

use crate::app::i18n::fluent::I18n;
use crate::infrastructure::video::{VideoCommand, VideoEvent, VideoFrame, VideoHandle, VideoSession};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::gallery::video_badge;
use crate::ui::styles;
use iced::widget::{button, image, Column, Container, Row, Stack, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    ContentFit, Element, Length,
};
use std::sync::Arc;
use tracing::debug;

/// Messages emitted by the video controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    TogglePlayback,
}

/// What the application has to react to after a video event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// The video started playing, from a play request or autoplay.
    PlaybackStarted,
    /// Playback failed; carries the i18n key of the notice.
    Failed(&'static str),
}

/// Playback status of the displayed video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Loading,
    Playing,
    Paused,
    Ended,
    Failed,
}

#[derive(Debug, Default)]
pub struct State {
    last_session: u64,
    session: Option<VideoSession>,
    handle: Option<VideoHandle>,
    frame: Option<image::Handle>,
    status: Status,
}

impl State {
    /// Follows the displayed memory: `Some(url)` for a video, `None`
    /// otherwise.
    ///
    /// A different video starts a new session; leaving videos ends it.
    pub fn show(&mut self, video_url: Option<&str>) {
        match video_url {
            Some(url) if self.session.as_ref().is_some_and(|s| s.url == url) => {}
            Some(url) => {
                self.last_session += 1;
                debug!(session = self.last_session, url, "video session started");
                self.reset();
                self.session = Some(VideoSession {
                    id: self.last_session,
                    url: url.to_string(),
                });
            }
            None => {
                if self.session.is_some() {
                    debug!("video session ended");
                }
                self.reset();
            }
        }
    }

    fn reset(&mut self) {
        self.session = None;
        self.handle = None;
        self.frame = None;
        self.status = Status::Loading;
    }

    /// Applies an engine event of `session`.
    pub fn handle_event(&mut self, session: u64, event: VideoEvent) -> Event {
        if self.session.as_ref().map(|s| s.id) != Some(session) {
            return Event::None;
        }
        match event {
            VideoEvent::Ready(handle) => self.handle = Some(handle),
            VideoEvent::Started => {
                self.status = Status::Playing;
                return Event::PlaybackStarted;
            }
            VideoEvent::Frame(frame) => self.frame = Some(frame_handle(frame)),
            VideoEvent::Ended => self.status = Status::Ended,
            VideoEvent::Failed(err) => {
                self.status = Status::Failed;
                self.handle = None;
                return Event::Failed(err.i18n_key());
            }
        }
        Event::None
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::TogglePlayback => {
                let (command, status) = match self.status {
                    Status::Playing => (VideoCommand::Pause, Status::Paused),
                    Status::Paused => (VideoCommand::Play, Status::Paused),
                    Status::Ended => (VideoCommand::Replay, Status::Ended),
                    Status::Loading | Status::Failed => return,
                };
                let Some(handle) = &self.handle else {
                    debug!(?command, "video engine not ready");
                    return;
                };
                match handle.send(command) {
                    Ok(()) => self.status = status,
                    Err(err) => debug!(error = %err, "video command dropped"),
                }
            }
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&VideoSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn frame(&self) -> Option<&image::Handle> {
        self.frame.as_ref()
    }
}

fn frame_handle(frame: VideoFrame) -> image::Handle {
    let pixels = Arc::try_unwrap(frame.rgba).unwrap_or_else(|shared| shared.as_ref().clone());
    image::Handle::from_rgba(frame.width, frame.height, pixels)
}

/// Contextual data needed to render the video.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    /// Thumbnail shown until the first frame arrives.
    pub poster: Option<&'a image::Handle>,
}

/// Render the video with its controls.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match ctx.state.frame().or(ctx.poster) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None => Container::new(Text::new(""))
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
    };

    let mut screen = Stack::new().push(picture);
    if ctx.state.frame().is_none() {
        let waiting = Column::new()
            .spacing(spacing::XS)
            .align_x(Horizontal::Center)
            .push(video_badge(ctx.i18n))
            .push(
                Text::new(ctx.i18n.tr("video-loading"))
                    .size(typography::CAPTION)
                    .color(palette::SLATE_200),
            );
        screen = screen.push(
            Container::new(waiting)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center),
        );
    }

    let label = match ctx.state.status() {
        Status::Playing => Some("video-pause"),
        Status::Paused => Some("video-play"),
        Status::Ended => Some("video-replay"),
        Status::Loading | Status::Failed => None,
    };

    let mut controls = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .height(Length::Fixed(sizing::ICON_MD + spacing::SM));
    if let Some(key) = label {
        controls = controls.push(
            button(Text::new(ctx.i18n.tr(key)).size(typography::BODY))
                .padding([spacing::XXS, spacing::MD])
                .on_press(Message::TogglePlayback)
                .style(styles::button::unselected),
        );
    }
    controls = controls.push(
        Text::new(ctx.i18n.tr("video-ducking-hint"))
            .size(typography::CAPTION)
            .color(palette::SLATE_400),
    );

    Column::new()
        .spacing(spacing::XS)
        .align_x(Horizontal::Center)
        .push(
            Container::new(screen)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(controls)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VideoError;
    use std::time::Duration;
    use tokio::sync::mpsc;

    const URL: &str = "https://video/v0.mp4";

    fn session_id(state: &State) -> u64 {
        state.session().map(|s| s.id).expect("a video is shown")
    }

    fn frame() -> VideoFrame {
        VideoFrame {
            rgba: Arc::new(vec![0; 2 * 2 * 4]),
            width: 2,
            height: 2,
            position: Duration::ZERO,
        }
    }

    fn playing() -> (State, mpsc::UnboundedReceiver<VideoCommand>) {
        let mut state = State::default();
        state.show(Some(URL));
        let id = session_id(&state);
        let (tx, rx) = mpsc::unbounded_channel();
        state.handle_event(id, VideoEvent::Ready(VideoHandle::new(tx)));
        state.handle_event(id, VideoEvent::Started);
        (state, rx)
    }

    #[test]
    fn showing_a_video_starts_a_session() {
        let mut state = State::default();
        assert!(state.session().is_none());
        state.show(Some(URL));
        assert_eq!(state.session().map(|s| s.url.as_str()), Some(URL));
        assert_eq!(state.status(), Status::Loading);
    }

    #[test]
    fn same_video_keeps_its_session() {
        let mut state = State::default();
        state.show(Some(URL));
        let first = session_id(&state);
        state.show(Some(URL));
        assert_eq!(session_id(&state), first);
    }

    #[test]
    fn coming_back_to_a_video_starts_over() {
        let mut state = State::default();
        state.show(Some(URL));
        let first = session_id(&state);
        state.show(None);
        assert!(state.session().is_none());
        state.show(Some(URL));
        assert_ne!(session_id(&state), first);
    }

    #[test]
    fn first_frame_after_play_reports_start() {
        let mut state = State::default();
        state.show(Some(URL));
        let id = session_id(&state);
        assert_eq!(state.handle_event(id, VideoEvent::Started), Event::PlaybackStarted);
        assert_eq!(state.status(), Status::Playing);
        assert_eq!(state.handle_event(id, VideoEvent::Frame(frame())), Event::None);
        assert!(state.frame().is_some());
    }

    #[test]
    fn events_of_a_left_video_are_dropped() {
        let mut state = State::default();
        state.show(Some(URL));
        let old = session_id(&state);
        state.show(Some("https://video/v1.mp4"));

        assert_eq!(state.handle_event(old, VideoEvent::Started), Event::None);
        assert_eq!(state.handle_event(old, VideoEvent::Frame(frame())), Event::None);
        assert_eq!(state.status(), Status::Loading);
        assert!(state.frame().is_none());
    }

    #[test]
    fn failure_is_reported_once_as_notice() {
        let mut state = State::default();
        state.show(Some(URL));
        let id = session_id(&state);
        let event = state.handle_event(id, VideoEvent::Failed(VideoError::NoVideoStream));
        assert_eq!(event, Event::Failed("error-video-no-stream"));
        assert_eq!(state.status(), Status::Failed);
        state.update(Message::TogglePlayback);
        assert_eq!(state.status(), Status::Failed);
    }

    #[test]
    fn toggle_pauses_and_resumes() {
        let (mut state, mut rx) = playing();
        state.update(Message::TogglePlayback);
        assert_eq!(state.status(), Status::Paused);
        assert_eq!(rx.try_recv().ok(), Some(VideoCommand::Pause));

        state.update(Message::TogglePlayback);
        assert_eq!(rx.try_recv().ok(), Some(VideoCommand::Play));
        let id = session_id(&state);
        assert_eq!(state.handle_event(id, VideoEvent::Started), Event::PlaybackStarted);
        assert_eq!(state.status(), Status::Playing);
    }

    #[test]
    fn ended_video_can_be_replayed() {
        let (mut state, mut rx) = playing();
        let id = session_id(&state);
        state.handle_event(id, VideoEvent::Ended);
        assert_eq!(state.status(), Status::Ended);
        state.update(Message::TogglePlayback);
        assert_eq!(rx.try_recv().ok(), Some(VideoCommand::Replay));
    }

    #[test]
    fn toggle_before_engine_is_ready_does_nothing() {
        let mut state = State::default();
        state.show(Some(URL));
        let id = session_id(&state);
        state.handle_event(id, VideoEvent::Started);
        state.update(Message::TogglePlayback);
        assert_eq!(state.status(), Status::Playing);
    }
}
