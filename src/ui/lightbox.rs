// SPDX-License-Identifier: MPL-2.0
//! Lightbox overlay: one memory at a time, with slideshow, music and story
//! controls.
//!
//! Pointer input mirrors the keyboard: the arrow buttons step through the
//! catalog, the close button and a click on the backdrop close the viewer.

use crate::app::i18n::fluent::I18n;
use crate::domain::media::{MediaItem, MediaKind};
use crate::domain::music::Track;
use crate::domain::ui::ProgressPercent;
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::music_controls;
use crate::ui::photo_cache::{PhotoCache, PhotoState};
use crate::ui::story_panel;
use crate::ui::styles;
use crate::ui::video_player;
use crate::ui::widgets::progress_ring::ProgressRing;
use iced::widget::{button, image, mouse_area, Column, Container, Row, Stack, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    mouse, ContentFit, Element, Length,
};

/// Messages emitted by the lightbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Close,
    Previous,
    Next,
    ToggleAutoplay,
    ToggleFullscreen,
    Music(music_controls::Message),
    Story(story_panel::Message),
    Video(video_player::Message),
}

/// Contextual data needed to render the lightbox.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub item: &'a MediaItem,
    /// 1-based position of `item` in the catalog.
    pub position: usize,
    pub total: usize,
    pub autoplaying: bool,
    pub slide_progress: ProgressPercent,
    pub photos: &'a PhotoCache,
    pub story: &'a story_panel::State,
    pub video: &'a video_player::State,
    pub tracks: &'a [Track],
    pub track_index: usize,
    pub music_intent_on: bool,
    pub music_progress: ProgressPercent,
    pub playlist_open: bool,
    pub fullscreen: bool,
}

/// Render the lightbox over the whole window.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let stage = Row::new()
        .spacing(spacing::MD)
        .align_y(Vertical::Center)
        .height(Length::Fill)
        .push(nav_button("‹", Message::Previous))
        .push(shield(media_card(&ctx)))
        .push(nav_button("›", Message::Next));

    let foreground = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .width(Length::Fill)
        .height(Length::Fill)
        .push(shield(top_bar(&ctx)))
        .push(stage);

    let backdrop = mouse_area(
        Container::new(Row::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::backdrop),
    )
    .on_press(Message::Close);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(backdrop)
        .push(
            Container::new(foreground)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_| iced::widget::container::Style {
                    text_color: Some(palette::WHITE),
                    ..Default::default()
                }),
        )
        .into()
}

/// Keeps clicks on `content` from reaching the backdrop.
fn shield<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    mouse_area(content)
        .interaction(mouse::Interaction::Idle)
        .into()
}

fn top_bar<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let (slideshow_label, slideshow_style): (_, fn(&iced::Theme, button::Status) -> button::Style) =
        if ctx.autoplaying {
            (ctx.i18n.tr("slideshow-pause"), styles::button::selected)
        } else {
            (ctx.i18n.tr("slideshow-start"), styles::button::unselected)
        };
    // a video cannot autoplay; its own playback replaces the timer
    let slideshow_button = button(Text::new(slideshow_label).size(typography::BODY))
        .style(slideshow_style)
        .on_press_maybe((!ctx.item.is_video()).then_some(Message::ToggleAutoplay));

    let mut slideshow = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(slideshow_button);
    if ctx.autoplaying {
        slideshow =
            slideshow.push(ProgressRing::new(ctx.slide_progress, palette::INDIGO_400).into_element());
    }

    let music = music_controls::view(music_controls::ViewContext {
        i18n: ctx.i18n,
        tracks: ctx.tracks,
        track_index: ctx.track_index,
        intent_on: ctx.music_intent_on,
        progress: ctx.music_progress,
        playlist_open: ctx.playlist_open,
        show_next: true,
    })
    .map(Message::Music);

    let fullscreen_label = if ctx.fullscreen {
        ctx.i18n.tr("navbar-exit-fullscreen")
    } else {
        ctx.i18n.tr("navbar-fullscreen")
    };

    Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Top)
        .push(slideshow)
        .push(Container::new(music).width(Length::Fill))
        .push(
            button(Text::new(fullscreen_label).size(typography::BODY))
                .on_press(Message::ToggleFullscreen)
                .style(styles::button::unselected),
        )
        .push(
            button(Text::new(ctx.i18n.tr("lightbox-close")).size(typography::BODY))
                .on_press(Message::Close)
                .style(styles::button::overlay(
                    palette::WHITE,
                    opacity::OVERLAY_MEDIUM,
                    opacity::OVERLAY_HOVER,
                )),
        )
        .into()
}

fn nav_button<'a>(glyph: &'a str, message: Message) -> Element<'a, Message> {
    button(
        Text::new(glyph)
            .size(typography::TITLE_LG)
            .width(Length::Fixed(sizing::ICON_XL))
            .center(),
    )
    .padding(spacing::XS)
    .on_press(message)
    .style(styles::button::overlay(
        palette::WHITE,
        opacity::OVERLAY_SUBTLE,
        opacity::OVERLAY_STRONG,
    ))
    .into()
}

/// Media, caption and story for the displayed memory.
fn media_card<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let item = ctx.item;

    let mut caption = Column::new()
        .spacing(spacing::XXS)
        .align_x(Horizontal::Center)
        .push(Text::new(item.title()).size(typography::TITLE_LG))
        .push(
            Text::new(format!(
                "{} · {}",
                item.date(),
                ctx.i18n.tr_with_args(
                    "lightbox-counter",
                    &[
                        ("position", ctx.position.to_string().as_str()),
                        ("total", ctx.total.to_string().as_str()),
                    ],
                )
            ))
            .size(typography::CAPTION)
            .color(palette::SLATE_400),
        );
    if let Some(description) = item.description() {
        caption = caption.push(
            Text::new(description)
                .size(typography::BODY)
                .color(palette::SLATE_200),
        );
    }

    let story = story_panel::view(story_panel::ViewContext {
        i18n: ctx.i18n,
        state: ctx.story,
    })
    .map(Message::Story);

    Column::new()
        .spacing(spacing::MD)
        .width(Length::Fill)
        .align_x(Horizontal::Center)
        .push(media(ctx))
        .push(caption)
        .push(story)
        .into()
}

fn media<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let preview = ctx.photos.get(ctx.item.preview_url());

    let stage: Element<'a, Message> = match ctx.item.kind() {
        MediaKind::Photo => match preview {
            PhotoState::Ready(handle) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Contain)
                .into(),
            PhotoState::Failed => centered(Text::new(ctx.i18n.tr("gallery-photo-failed"))),
            PhotoState::Missing | PhotoState::Loading => centered(Text::new("")),
        },
        MediaKind::Video { .. } => {
            let poster = match preview {
                PhotoState::Ready(handle) => Some(handle),
                PhotoState::Missing | PhotoState::Loading | PhotoState::Failed => None,
            };
            video_player::view(video_player::ViewContext {
                i18n: ctx.i18n,
                state: ctx.video,
                poster,
            })
            .map(Message::Video)
        }
    };

    Container::new(stage)
        .width(Length::Fill)
        .height(Length::FillPortion(4))
        .into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}
