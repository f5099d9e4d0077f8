// SPDX-License-Identifier: MPL-2.0
//! Root view: gallery page with the lightbox layered on top when open.

use super::Message;
use crate::app::i18n::fluent::I18n;
use crate::catalog::Album;
use crate::infrastructure::MusicPlayer;
use crate::playback::{BackgroundMusic, SlideshowCoordinator};
use crate::ui::photo_cache::PhotoCache;
use crate::ui::{
    gallery, lightbox, music_controls, navbar, notice, story_panel, styles, video_player,
};
use iced::widget::{mouse_area, Column, Container, Stack};
use iced::{Element, Length};

/// Read-only view over the application state.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub album: &'a Album,
    pub slideshow: &'a SlideshowCoordinator,
    pub music: &'a BackgroundMusic<MusicPlayer>,
    pub story: &'a story_panel::State,
    pub video: &'a video_player::State,
    pub photos: &'a PhotoCache,
    pub playlist_open: bool,
    pub fullscreen: bool,
    pub notice: Option<&'a str>,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut page = Column::new().width(Length::Fill).height(Length::Fill);

    if let Some(key) = ctx.notice {
        page = page.push(notice::view(ctx.i18n, key).map(Message::Notice));
    }

    // The lightbox has its own music controls.
    let lightbox_open = ctx.slideshow.is_open();
    if !ctx.fullscreen {
        page = page.push(
            navbar::view(navbar::ViewContext {
                i18n: ctx.i18n,
                album_title: ctx.album.title(),
                tracks: ctx.music.tracks(),
                track_index: ctx.music.track_index(),
                music_intent_on: ctx.music.intent_on(),
                music_progress: ctx.music.progress(),
                playlist_open: ctx.playlist_open && !lightbox_open,
                fullscreen: ctx.fullscreen,
            })
            .map(Message::Navbar),
        );
    }

    let gallery = gallery::view(gallery::ViewContext {
        i18n: ctx.i18n,
        album: ctx.album,
        photos: ctx.photos,
    })
    .map(Message::Gallery);

    // A click outside the open playlist closes it.
    page = if ctx.playlist_open && !lightbox_open {
        page.push(mouse_area(gallery).on_press(Message::Navbar(navbar::Message::Music(
            music_controls::Message::ClosePlaylist,
        ))))
    } else {
        page.push(gallery)
    };

    let base = Container::new(page)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::page);

    let Some(item) = ctx.slideshow.current() else {
        return base.into();
    };

    let catalog = ctx.slideshow.catalog();
    let position = catalog.index_of(item.id()).map_or(1, |index| index + 1);

    let overlay = lightbox::view(lightbox::ViewContext {
        i18n: ctx.i18n,
        item,
        position,
        total: catalog.len(),
        autoplaying: ctx.slideshow.is_autoplaying(),
        slide_progress: ctx.slideshow.progress(),
        photos: ctx.photos,
        story: ctx.story,
        video: ctx.video,
        tracks: ctx.music.tracks(),
        track_index: ctx.music.track_index(),
        music_intent_on: ctx.music.intent_on(),
        music_progress: ctx.music.progress(),
        playlist_open: ctx.playlist_open,
        fullscreen: ctx.fullscreen,
    })
    .map(Message::Lightbox);

    Stack::new().push(base).push(overlay).into()
}
