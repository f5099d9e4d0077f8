// SPDX-License-Identifier: MPL-2.0
//! Navigation bar shown above the gallery.
//!
//! Holds the brand, the "Play" button that starts the slideshow from the
//! first memory, the music controls and the fullscreen toggle.

use crate::app::i18n::fluent::I18n;
use crate::domain::music::Track;
use crate::domain::ui::ProgressPercent;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::music_controls;
use crate::ui::styles;
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{button, Column, Container, Row, Text},
    Element, Length,
};

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub album_title: &'a str,
    pub tracks: &'a [Track],
    pub track_index: usize,
    pub music_intent_on: bool,
    pub music_progress: ProgressPercent,
    pub playlist_open: bool,
    pub fullscreen: bool,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    PlayAll,
    ToggleFullscreen,
    Music(music_controls::Message),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartSlideshow,
    ToggleFullscreen,
    Music(music_controls::Message),
}

/// Process a navbar message and return the corresponding event.
#[must_use]
pub fn update(message: Message) -> Event {
    match message {
        Message::PlayAll => Event::StartSlideshow,
        Message::ToggleFullscreen => Event::ToggleFullscreen,
        Message::Music(music) => Event::Music(music),
    }
}

/// Render the navigation bar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let brand = Column::new()
        .push(Text::new(ctx.i18n.tr("window-title")).size(typography::TITLE_MD))
        .push(Text::new(ctx.album_title).size(typography::CAPTION));

    let play_button = button(Text::new(ctx.i18n.tr("navbar-play")).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .on_press(Message::PlayAll)
        .style(styles::button::primary);

    let music = music_controls::view(music_controls::ViewContext {
        i18n: ctx.i18n,
        tracks: ctx.tracks,
        track_index: ctx.track_index,
        intent_on: ctx.music_intent_on,
        progress: ctx.music_progress,
        playlist_open: ctx.playlist_open,
        show_next: false,
    })
    .map(Message::Music);

    let fullscreen_label = if ctx.fullscreen {
        ctx.i18n.tr("navbar-exit-fullscreen")
    } else {
        ctx.i18n.tr("navbar-fullscreen")
    };
    let fullscreen_button = button(Text::new(fullscreen_label).size(typography::BODY))
        .on_press(Message::ToggleFullscreen)
        .style(styles::button::unselected);

    let actions = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Top)
        .push(play_button)
        .push(music)
        .push(fullscreen_button);

    let row = Row::new()
        .spacing(spacing::LG)
        .padding([spacing::MD, spacing::LG])
        .align_y(Vertical::Top)
        .push(Container::new(brand).width(Length::Fill))
        .push(actions);

    Container::new(row)
        .width(Length::Fill)
        .align_x(Horizontal::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_starts_the_slideshow() {
        assert_eq!(update(Message::PlayAll), Event::StartSlideshow);
    }

    #[test]
    fn music_messages_pass_through() {
        assert_eq!(
            update(Message::Music(music_controls::Message::SelectTrack(1))),
            Event::Music(music_controls::Message::SelectTrack(1))
        );
        assert_eq!(update(Message::ToggleFullscreen), Event::ToggleFullscreen);
    }
}
