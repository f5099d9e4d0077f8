// SPDX-License-Identifier: MPL-2.0
//! Background music controls: toggle, next track, playlist dropdown and
//! progress bar.
//!
//! The same controls appear in the navbar and in the lightbox; both feed
//! [`update`], which drives the [`BackgroundMusic`] controller.

use crate::app::i18n::fluent::I18n;
use crate::application::port::MusicOutput;
use crate::domain::music::Track;
use crate::domain::ui::ProgressPercent;
use crate::playback::BackgroundMusic;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Column, Container, Row, Text};
use iced::{alignment::Vertical, Element, Length};

/// Messages emitted by the music controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    ToggleIntent,
    NextTrack,
    TogglePlaylist,
    ClosePlaylist,
    SelectTrack(usize),
}

/// Applies a control message to the music controller.
pub fn update<O: MusicOutput>(
    message: Message,
    music: &mut BackgroundMusic<O>,
    playlist_open: &mut bool,
) {
    match message {
        Message::ToggleIntent => music.toggle_intent(),
        Message::NextTrack => music.advance_track(),
        Message::TogglePlaylist => *playlist_open = !*playlist_open,
        Message::ClosePlaylist => *playlist_open = false,
        Message::SelectTrack(index) => {
            *playlist_open = false;
            music.select_track(index);
        }
    }
}

/// Contextual data needed to render the music controls.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub tracks: &'a [Track],
    pub track_index: usize,
    pub intent_on: bool,
    pub progress: ProgressPercent,
    pub playlist_open: bool,
    /// Show the "next track" button (lightbox only).
    pub show_next: bool,
}

/// Render the control row, with the progress bar and playlist below it.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let (toggle_label, toggle_style): (_, fn(&iced::Theme, button::Status) -> button::Style) =
        if ctx.intent_on {
            (ctx.i18n.tr("music-turn-off"), styles::button::selected)
        } else {
            (ctx.i18n.tr("music-turn-on"), styles::button::unselected)
        };

    let mut row = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(
            button(Text::new(toggle_label).size(typography::BODY))
                .on_press(Message::ToggleIntent)
                .style(toggle_style),
        );

    if ctx.show_next {
        row = row.push(
            button(Text::new(ctx.i18n.tr("music-next-track")).size(typography::BODY))
                .on_press(Message::NextTrack)
                .style(styles::button::unselected),
        );
    }

    let playlist_style = if ctx.playlist_open {
        styles::button::selected
    } else {
        styles::button::unselected
    };
    row = row.push(
        button(Text::new(ctx.i18n.tr("music-select-track")).size(typography::BODY))
            .on_press(Message::TogglePlaylist)
            .style(playlist_style),
    );

    if let Some(track) = ctx.tracks.get(ctx.track_index) {
        row = row.push(
            Text::new(
                ctx.i18n
                    .tr_with_args("music-now-playing", &[("title", track.title())]),
            )
            .size(typography::CAPTION),
        );
    }

    let mut column = Column::new().spacing(spacing::XS).push(row);

    if ctx.intent_on {
        column = column.push(progress_bar(ctx.progress));
    }

    if ctx.playlist_open {
        column = column.push(playlist(&ctx));
    }

    column.into()
}

/// Thin bar showing how far the current track has played.
fn progress_bar<'a>(progress: ProgressPercent) -> Element<'a, Message> {
    let filled = fill_portion(progress);
    let mut bar = Row::new().height(Length::Fixed(sizing::MUSIC_PROGRESS_BAR));
    if filled > 0 {
        bar = bar.push(
            Container::new(Row::new())
                .width(Length::FillPortion(filled))
                .height(Length::Fill)
                .style(styles::container::progress_fill),
        );
    }
    if filled < PROGRESS_STEPS {
        bar = bar.push(
            Container::new(Row::new())
                .width(Length::FillPortion(PROGRESS_STEPS - filled))
                .height(Length::Fill)
                .style(styles::container::progress_track),
        );
    }
    Container::new(bar)
        .width(Length::Fixed(sizing::PLAYLIST_WIDTH))
        .into()
}

const PROGRESS_STEPS: u16 = 1000;

/// Share of [`PROGRESS_STEPS`] that is filled.
fn fill_portion(progress: ProgressPercent) -> u16 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // fraction is clamped to [0, 1]
    let filled = (progress.as_fraction() * f32::from(PROGRESS_STEPS)).round() as u16;
    filled.min(PROGRESS_STEPS)
}

/// Dropdown listing every track; the playing one is highlighted.
fn playlist<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut list = Column::new().spacing(spacing::XXS).push(
        Text::new(ctx.i18n.tr("playlist-header").to_uppercase()).size(typography::CAPTION),
    );
    for (index, track) in ctx.tracks.iter().enumerate() {
        list = list.push(
            button(Text::new(track.title()).size(typography::BODY))
                .width(Length::Fill)
                .on_press(Message::SelectTrack(index))
                .style(styles::button::playlist_item(index == ctx.track_index)),
        );
    }
    Container::new(list)
        .padding(spacing::XS)
        .width(Length::Fixed(sizing::PLAYLIST_WIDTH))
        .style(styles::container::panel)
        .into()
}
