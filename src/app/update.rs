// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application root.
//!
//! Every handler works on an [`UpdateContext`] borrowing the pieces of
//! [`App`](super::App) it may touch, and returns the follow-up [`Task`].

use super::Message;
use crate::application::port::{StoryReply, StoryService, StoryText};
use crate::error::StoryError;
use crate::infrastructure::{GeminiClient, MusicEvent, MusicPlayer, VideoEvent};
use crate::playback::{slideshow, BackgroundMusic, Effect, SlideshowCoordinator};
use crate::ui::photo_cache::PhotoCache;
use crate::ui::{gallery, lightbox, music_controls, navbar, story_panel, video_player};
use iced::{window, Task};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Mutable view over the application state used by the handlers.
pub struct UpdateContext<'a> {
    pub slideshow: &'a mut SlideshowCoordinator,
    pub music: &'a mut BackgroundMusic<MusicPlayer>,
    pub story: &'a mut story_panel::State,
    pub story_service: Option<&'a Arc<StoryService<GeminiClient>>>,
    pub video: &'a mut video_player::State,
    pub photos: &'a mut PhotoCache,
    pub playlist_open: &'a mut bool,
    pub fullscreen: &'a mut bool,
    pub window_id: &'a mut Option<window::Id>,
    pub notice: &'a mut Option<String>,
}

// =============================================================================
// Component handlers
// =============================================================================

pub fn handle_navbar_message(ctx: &mut UpdateContext<'_>, message: navbar::Message) -> Task<Message> {
    match navbar::update(message) {
        navbar::Event::StartSlideshow => {
            handle_slideshow_message(ctx, slideshow::Message::StartSlideshow)
        }
        navbar::Event::ToggleFullscreen => toggle_fullscreen(ctx),
        navbar::Event::Music(music_message) => {
            music_controls::update(music_message, ctx.music, ctx.playlist_open);
            Task::none()
        }
    }
}

pub fn handle_gallery_message(
    ctx: &mut UpdateContext<'_>,
    message: gallery::Message,
) -> Task<Message> {
    match message {
        gallery::Message::Open(id) => handle_slideshow_message(
            ctx,
            slideshow::Message::Open {
                id,
                autoplay: false,
            },
        ),
    }
}

pub fn handle_lightbox_message(
    ctx: &mut UpdateContext<'_>,
    message: lightbox::Message,
) -> Task<Message> {
    match message {
        lightbox::Message::Close => handle_slideshow_message(ctx, slideshow::Message::Close),
        lightbox::Message::Previous => handle_slideshow_message(ctx, slideshow::Message::Previous),
        lightbox::Message::Next => handle_slideshow_message(ctx, slideshow::Message::Next),
        lightbox::Message::ToggleAutoplay => {
            handle_slideshow_message(ctx, slideshow::Message::ToggleAutoplay)
        }
        lightbox::Message::ToggleFullscreen => toggle_fullscreen(ctx),
        lightbox::Message::Music(music_message) => {
            music_controls::update(music_message, ctx.music, ctx.playlist_open);
            Task::none()
        }
        lightbox::Message::Story(story_panel::Message::Reveal) => reveal_story(ctx),
        lightbox::Message::Video(video_message) => {
            ctx.video.update(video_message);
            Task::none()
        }
    }
}

/// Runs a coordinator transition and applies its effect.
pub fn handle_slideshow_message(
    ctx: &mut UpdateContext<'_>,
    message: slideshow::Message,
) -> Task<Message> {
    let effect = ctx.slideshow.handle(message, Instant::now());
    apply_effect(ctx, effect)
}

/// Propagates a coordinator effect to music, story and photos.
fn apply_effect(ctx: &mut UpdateContext<'_>, effect: Effect) -> Task<Message> {
    if effect == Effect::None {
        return Task::none();
    }

    let video_url = ctx
        .slideshow
        .current()
        .filter(|item| item.is_video())
        .map(|item| item.url().to_string());
    ctx.video.show(video_url.as_deref());
    ctx.music.set_viewed_kind(ctx.slideshow.viewed_kind());

    match &effect {
        Effect::SlideshowStarted(_) => ctx.music.ensure_intent_on(),
        Effect::Closed => *ctx.playlist_open = false,
        Effect::ShowItem(_) | Effect::None => {}
    }

    ctx.story.sync(ctx.slideshow.current_id());

    let url = ctx
        .slideshow
        .current()
        .map(|item| item.preview_url().to_string());
    match url {
        Some(url) => fetch_photo(ctx.photos, url),
        None => Task::none(),
    }
}

fn reveal_story(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(item) = ctx.slideshow.current() else {
        return Task::none();
    };
    let Some(request) = ctx.story.request(item) else {
        debug!("story already loading");
        return Task::none();
    };

    match ctx.story_service {
        Some(service) => {
            let service = Arc::clone(service);
            Task::perform(
                async move { service.tell(request).await },
                Message::StoryReady,
            )
        }
        None => {
            let reason = StoryError::Network("story client unavailable".to_string());
            ctx.story.receive(StoryReply {
                id: request.id,
                text: StoryText::Fallback(reason.fallback_key()),
            });
            Task::none()
        }
    }
}

// =============================================================================
// Background work
// =============================================================================

pub fn handle_music_event(ctx: &mut UpdateContext<'_>, event: MusicEvent) -> Task<Message> {
    apply_music_event(ctx.music, ctx.notice, event);
    Task::none()
}

fn apply_music_event(
    music: &mut BackgroundMusic<MusicPlayer>,
    notice: &mut Option<String>,
    event: MusicEvent,
) {
    match event {
        MusicEvent::Ready(handle) => {
            music.output_mut().attach(handle);
            music.resync();
        }
        MusicEvent::Unavailable(err) => {
            *notice = Some(err.i18n_key().to_string());
            // Ready may already have let the controller report sound
            music.on_playback_rejected(&err);
            music.output_mut().mark_unavailable(err);
        }
        MusicEvent::Progress { position, duration } => {
            music.on_progress_tick(position, duration);
        }
        MusicEvent::TrackEnded => music.on_track_ended(),
        MusicEvent::PlaybackRejected(err) => {
            *notice = Some(err.i18n_key().to_string());
            music.on_playback_rejected(&err);
        }
    }
}

pub fn handle_video_event(
    ctx: &mut UpdateContext<'_>,
    session: u64,
    event: VideoEvent,
) -> Task<Message> {
    match ctx.video.handle_event(session, event) {
        video_player::Event::PlaybackStarted => {
            handle_slideshow_message(ctx, slideshow::Message::VideoPlaybackStarted)
        }
        video_player::Event::Failed(key) => {
            *ctx.notice = Some(key.to_string());
            Task::none()
        }
        video_player::Event::None => Task::none(),
    }
}

/// Starts downloading `url` unless it is cached or already in flight.
pub fn fetch_photo(photos: &mut PhotoCache, url: String) -> Task<Message> {
    match photos.begin(&url) {
        Some(download) => Task::perform(download, move |result| Message::PhotoLoaded {
            url: url.clone(),
            result,
        }),
        None => Task::none(),
    }
}

// =============================================================================
// Window
// =============================================================================

fn toggle_fullscreen(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(id) = *ctx.window_id else {
        warn!("fullscreen requested before the window was known");
        return Task::none();
    };
    *ctx.fullscreen = !*ctx.fullscreen;
    let mode = if *ctx.fullscreen {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(id, mode)
}

/// Re-reads the window mode so the fullscreen flag follows changes made by
/// the window manager.
pub fn refresh_window_mode(window_id: &mut Option<window::Id>, id: window::Id) -> Task<Message> {
    *window_id = Some(id);
    window::mode(id).map(Message::WindowModeChanged)
}

pub fn handle_window_mode(fullscreen: &mut bool, mode: window::Mode) {
    let actual = is_fullscreen(mode);
    if *fullscreen != actual {
        debug!(fullscreen = actual, "window mode changed outside the app");
        *fullscreen = actual;
    }
}

fn is_fullscreen(mode: window::Mode) -> bool {
    mode == window::Mode::Fullscreen
}
