// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::port::StoryReply;
use crate::catalog::Album;
use crate::infrastructure::{MusicEvent, VideoEvent};
use crate::playback::slideshow;
use crate::ui::{gallery, lightbox, navbar, notice};
use iced::widget::image;
use iced::window;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENTS
    // ═══════════════════════════════════════════════════════════════════════
    Navbar(navbar::Message),
    Gallery(gallery::Message),
    Lightbox(lightbox::Message),
    Notice(notice::Message),
    /// Keyboard shortcuts and countdown frames.
    Slideshow(slideshow::Message),

    // ═══════════════════════════════════════════════════════════════════════
    // BACKGROUND WORK
    // ═══════════════════════════════════════════════════════════════════════
    /// Event from the music engine thread.
    MusicEngine(MusicEvent),
    /// Event from the engine of a video session.
    Video { session: u64, event: VideoEvent },
    /// A story request finished.
    StoryReady(StoryReply),
    /// A photo download finished.
    PhotoLoaded {
        url: String,
        result: Result<image::Handle, String>,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // WINDOW
    // ═══════════════════════════════════════════════════════════════════════
    /// An event revealed the id of the main window.
    WindowSeen(window::Id),
    /// Current mode of the main window, read back after a window event.
    WindowModeChanged(window::Mode),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `WONDER_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// The album to show.
    pub album: Album,
    /// I18n key of a warning raised while resolving the album.
    pub album_warning: Option<&'static str>,
}
