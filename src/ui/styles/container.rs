// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Page background behind the gallery.
pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::SLATE_950)),
        text_color: Some(palette::SLATE_200),
        ..Default::default()
    }
}

/// Floating surface for the navbar, playlist and story panel.
pub fn panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..palette::SLATE_900
        })),
        border: Border {
            color: palette::SLATE_800,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        shadow: shadow::LG,
        ..Default::default()
    }
}

/// Gallery card frame.
pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::SLATE_800)),
        border: Border {
            color: palette::SLATE_700,
            width: border::WIDTH_SM,
            radius: radius::XL.into(),
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

/// Dimmed layer behind the lightbox content.
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::BACKDROP,
            ..palette::SLATE_950
        })),
        text_color: Some(palette::WHITE),
        ..Default::default()
    }
}

/// Small pill label, e.g. the video badge.
pub fn badge(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::BLACK
        })),
        text_color: Some(palette::AMBER_400),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Warning banner shown above the gallery.
pub fn notice(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::WARNING_500
        })),
        text_color: Some(palette::SLATE_200),
        border: Border {
            color: palette::WARNING_500,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Filled part of the music progress bar.
pub fn progress_fill(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::PURPLE_400)),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Unfilled part of the music progress bar.
pub fn progress_track(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::SLATE_700)),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
