// SPDX-License-Identifier: MPL-2.0
//! Gallery page: hero header, grid of memory cards and footer.

use crate::app::config::GALLERY_COLUMNS;
use crate::app::i18n::fluent::I18n;
use crate::catalog::Album;
use crate::domain::media::{MediaId, MediaItem};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::photo_cache::{PhotoCache, PhotoState};
use crate::ui::styles;
use iced::widget::{button, image, scrollable, Column, Container, Row, Stack, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    ContentFit, Element, Length,
};

/// Messages emitted by the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A card was clicked.
    Open(MediaId),
}

/// Contextual data needed to render the gallery.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub album: &'a Album,
    pub photos: &'a PhotoCache,
}

/// Render the scrollable gallery page.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::XL)
        .padding([spacing::LG, spacing::LG])
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .align_x(Horizontal::Center)
        .push(hero(&ctx))
        .push(grid(&ctx))
        .push(Text::new(ctx.i18n.tr("footer-credit").to_uppercase()).size(typography::CAPTION));

    scrollable(
        Container::new(content)
            .width(Length::Fill)
            .align_x(Horizontal::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn hero<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let badge = Container::new(Text::new(ctx.album.subtitle()).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::container::badge);

    Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .push(badge)
        .push(
            Text::new(ctx.i18n.tr("hero-headline"))
                .size(typography::DISPLAY),
        )
        .push(
            Text::new(ctx.i18n.tr("hero-tagline"))
                .size(typography::BODY)
                .color(palette::SLATE_400),
        )
        .into()
}

fn grid<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let catalog = ctx.album.catalog();
    if catalog.is_empty() {
        return Container::new(
            Text::new(ctx.i18n.tr("gallery-empty"))
                .size(typography::TITLE_LG)
                .color(palette::INDIGO_200),
        )
        .padding([spacing::XXL * 2.0, 0.0])
        .into();
    }

    let items: Vec<&MediaItem> = catalog.items().collect();
    let mut rows = Column::new().spacing(spacing::XL);
    for chunk in items.chunks(GALLERY_COLUMNS) {
        let mut row = Row::new().spacing(spacing::XL);
        for &item in chunk {
            row = row.push(
                Container::new(card(ctx.i18n, item, ctx.photos)).width(Length::FillPortion(1)),
            );
        }
        // keep card widths equal on a short last row
        for _ in chunk.len()..GALLERY_COLUMNS {
            row = row.push(Container::new(Row::new()).width(Length::FillPortion(1)));
        }
        rows = rows.push(row);
    }
    rows.into()
}

/// One memory: preview on top, title and date below.
fn card<'a>(i18n: &I18n, item: &'a MediaItem, photos: &'a PhotoCache) -> Element<'a, Message> {
    let mut preview = Stack::new().push(preview(i18n, item.preview_url(), photos));
    if item.is_video() {
        preview = preview.push(
            Container::new(video_badge(i18n))
                .width(Length::Fill)
                .height(Length::Fixed(sizing::CARD_IMAGE_HEIGHT))
                .padding(spacing::SM)
                .align_x(Horizontal::Right)
                .align_y(Vertical::Top),
        );
    }

    let caption = Column::new()
        .spacing(spacing::XXS)
        .padding(spacing::MD)
        .push(Text::new(item.title()).size(typography::TITLE_SM))
        .push(
            Text::new(item.date())
                .size(typography::CAPTION)
                .color(palette::SLATE_400),
        );

    let body = Container::new(Column::new().push(preview).push(caption))
        .width(Length::Fill)
        .style(styles::container::card);

    button(body)
        .padding(0.0)
        .width(Length::Fill)
        .on_press(Message::Open(item.id().clone()))
        .style(styles::button::bare)
        .into()
}

/// Photo from the cache, or a placeholder while it loads or after it failed.
fn preview<'a>(i18n: &I18n, url: &str, photos: &'a PhotoCache) -> Element<'a, Message> {
    match photos.get(url) {
        PhotoState::Ready(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(sizing::CARD_IMAGE_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        PhotoState::Failed => placeholder(Some(i18n.tr("gallery-photo-failed"))),
        PhotoState::Missing | PhotoState::Loading => placeholder(None),
    }
}

fn placeholder<'a>(label: Option<String>) -> Element<'a, Message> {
    let text = Text::new(label.unwrap_or_default())
        .size(typography::CAPTION)
        .color(palette::SLATE_500);
    Container::new(text)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::CARD_IMAGE_HEIGHT))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

/// Pill marking a video memory.
pub fn video_badge<'a, M: 'a>(i18n: &I18n) -> Element<'a, M> {
    Container::new(Text::new(i18n.tr("video-badge")).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::badge)
        .into()
}
