// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the gallery, the
//! lightbox and the background music.
//!
//! The `App` struct wires together the domains (catalog, slideshow, music,
//! stories, localization) and translates messages into side effects like
//! photo downloads, story requests or window mode changes.

pub mod config;
pub mod i18n;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::port::StoryService;
use crate::catalog::{self, Album};
use crate::infrastructure::{GeminiClient, MusicPlayer};
use crate::playback::{BackgroundMusic, SlideshowCoordinator};
use crate::ui::photo_cache::PhotoCache;
use crate::ui::{story_panel, video_player};
use i18n::fluent::I18n;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    album: Album,
    slideshow: SlideshowCoordinator,
    music: BackgroundMusic<MusicPlayer>,
    story: story_panel::State,
    /// `None` when no HTTP client could be built; stories then fall back.
    story_service: Option<Arc<StoryService<GeminiClient>>>,
    video: video_player::State,
    photos: PhotoCache,
    playlist_open: bool,
    fullscreen: bool,
    window_id: Option<window::Id>,
    /// I18n key of the warning banner.
    notice: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("slideshow", &self.slideshow.state())
            .field("music_intent_on", &self.music.intent_on())
            .field("fullscreen", &self.fullscreen)
            .finish_non_exhaustive()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(config::DEFAULT_WINDOW_WIDTH, config::DEFAULT_WINDOW_HEIGHT),
        min_size: Some(iced::Size::new(
            config::MIN_WINDOW_WIDTH,
            config::MIN_WINDOW_HEIGHT,
        )),
        ..window::Settings::default()
    }
}

/// Picks the album to show: the catalog file when given and readable,
/// otherwise the built-in album.
///
/// A catalog file that cannot be loaded is logged and reported through the
/// returned warning key.
///
/// # Errors
///
/// Returns an error only if the built-in album is inconsistent.
pub fn resolve_album(
    catalog_path: Option<&Path>,
) -> crate::error::Result<(Album, Option<&'static str>)> {
    if let Some(path) = catalog_path {
        match catalog::load_album(path) {
            Ok(album) => return Ok((album, None)),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "catalog file could not be loaded");
                let album = catalog::builtin_album()?;
                return Ok((album, Some("notification-catalog-load-error")));
            }
        }
    }
    Ok((catalog::builtin_album()?, None))
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and starts downloading the gallery
    /// photos.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.config_dir);
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang, &config);

        let album = flags.album;
        let slideshow = SlideshowCoordinator::new(album.shared_catalog(), config.slide_duration());
        let music = BackgroundMusic::new(
            MusicPlayer::new(),
            album.tracks().to_vec(),
            config.start_track(),
            config.music_volume(),
        );

        let story_service = match GeminiClient::new(config.gemini_settings(config::story_api_key()))
        {
            Ok(client) => Some(Arc::new(StoryService::new(client))),
            Err(err) => {
                warn!(error = %err, "story generator unavailable");
                None
            }
        };

        let notice = config_warning.or(flags.album_warning.map(str::to_string));

        let mut app = App {
            i18n,
            album,
            slideshow,
            music,
            story: story_panel::State::default(),
            story_service,
            video: video_player::State::default(),
            photos: PhotoCache::default(),
            playlist_open: false,
            fullscreen: false,
            window_id: None,
            notice,
        };

        let task = app.prefetch_gallery();
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.slideshow.current() {
            Some(item) => format!("{} - {app_name}", item.title()),
            None => format!("{} - {app_name}", self.album.title()),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_countdown_subscription(self.slideshow.countdown_id()),
            subscription::create_music_subscription(),
            subscription::create_video_subscription(self.video.session()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            slideshow: &mut self.slideshow,
            music: &mut self.music,
            story: &mut self.story,
            story_service: self.story_service.as_ref(),
            video: &mut self.video,
            photos: &mut self.photos,
            playlist_open: &mut self.playlist_open,
            fullscreen: &mut self.fullscreen,
            window_id: &mut self.window_id,
            notice: &mut self.notice,
        };

        match message {
            Message::Navbar(navbar_message) => update::handle_navbar_message(&mut ctx, navbar_message),
            Message::Gallery(gallery_message) => {
                update::handle_gallery_message(&mut ctx, gallery_message)
            }
            Message::Lightbox(lightbox_message) => {
                update::handle_lightbox_message(&mut ctx, lightbox_message)
            }
            Message::Notice(_) => {
                *ctx.notice = None;
                Task::none()
            }
            Message::Slideshow(slideshow_message) => {
                update::handle_slideshow_message(&mut ctx, slideshow_message)
            }
            Message::MusicEngine(event) => update::handle_music_event(&mut ctx, event),
            Message::Video { session, event } => {
                update::handle_video_event(&mut ctx, session, event)
            }
            Message::StoryReady(reply) => {
                ctx.story.receive(reply);
                Task::none()
            }
            Message::PhotoLoaded { url, result } => {
                ctx.photos.finish(url, result);
                Task::none()
            }
            Message::WindowSeen(id) => update::refresh_window_mode(ctx.window_id, id),
            Message::WindowModeChanged(mode) => {
                update::handle_window_mode(ctx.fullscreen, mode);
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            album: &self.album,
            slideshow: &self.slideshow,
            music: &self.music,
            story: &self.story,
            video: &self.video,
            photos: &self.photos,
            playlist_open: self.playlist_open,
            fullscreen: self.fullscreen,
            notice: self.notice.as_deref(),
        })
    }

    /// Starts downloading every gallery preview.
    fn prefetch_gallery(&mut self) -> Task<Message> {
        let urls: Vec<String> = self
            .album
            .catalog()
            .items()
            .map(|item| item.preview_url().to_string())
            .collect();
        Task::batch(
            urls.into_iter()
                .map(|url| update::fetch_photo(&mut self.photos, url)),
        )
    }
}
