// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Primary action ("Play", "Reveal Story").
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::INDIGO_600)),
            text_color: WHITE,
            border: Border {
                color: palette::INDIGO_500,
                width: 1.0,
                radius: radius::FULL.into(),
            },
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(palette::INDIGO_500)),
            text_color: WHITE,
            border: Border {
                color: palette::INDIGO_400,
                width: 1.0,
                radius: radius::FULL.into(),
            },
            shadow: shadow::MD,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(palette::SLATE_700)),
            text_color: palette::SLATE_400,
            border: Border {
                radius: radius::FULL.into(),
                ..Border::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Round translucent buttons floating over media (navigation, close).
pub fn overlay(
    text_color: Color,
    alpha_normal: f32,
    alpha_hover: f32,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let alpha = match status {
            button::Status::Hovered => alpha_hover,
            button::Status::Pressed => opacity::OVERLAY_PRESSED,
            _ => alpha_normal,
        };

        button::Style {
            background: Some(Background::Color(Color { a: alpha, ..BLACK })),
            text_color,
            border: Border {
                radius: radius::FULL.into(),
                ..Border::default()
            },
            shadow: shadow::MD,
            snap: true,
        }
    }
}

/// Toggle that is currently on (music playing, slideshow running).
pub fn selected(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::INDIGO_400,
        _ => palette::INDIGO_500,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: palette::INDIGO_200,
            width: 1.0,
            radius: radius::FULL.into(),
        },
        shadow: shadow::SM,
        snap: true,
    }
}

/// Toggle that is currently off, and other secondary actions.
pub fn unselected(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, border_color) = match status {
        button::Status::Hovered => (palette::SLATE_700, palette::INDIGO_400),
        _ => (palette::SLATE_800, palette::SLATE_700),
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: palette::SLATE_200,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::FULL.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Row of the playlist dropdown; the playing track is highlighted.
pub fn playlist_item(is_current: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let background = match (is_current, status) {
            (true, _) => Some(Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::INDIGO_500
            })),
            (false, button::Status::Hovered) => Some(Background::Color(palette::SLATE_700)),
            (false, _) => None,
        };
        button::Style {
            background,
            text_color: if is_current {
                palette::INDIGO_200
            } else {
                palette::SLATE_200
            },
            border: Border {
                radius: radius::MD.into(),
                ..Border::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Invisible button wrapping a gallery card or the lightbox backdrop.
pub fn bare(_theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: WHITE,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_button_uses_brand_colors() {
        let theme = Theme::Dark;
        let style = primary(&theme, button::Status::Active);

        if let Some(Background::Color(bg)) = style.background {
            assert_eq!(bg, palette::INDIGO_600);
        } else {
            panic!("Expected background color");
        }
    }

    #[test]
    fn overlay_button_alpha_changes_on_hover() {
        let theme = Theme::Dark;
        let style_fn = overlay(WHITE, 0.5, 0.8);

        let normal = style_fn(&theme, button::Status::Active);
        let hover = style_fn(&theme, button::Status::Hovered);

        assert_ne!(normal.background, hover.background);
    }

    #[test]
    fn playlist_highlights_current_track_only() {
        let theme = Theme::Dark;
        let current = playlist_item(true)(&theme, button::Status::Active);
        let other = playlist_item(false)(&theme, button::Status::Active);
        assert!(current.background.is_some());
        assert!(other.background.is_none());
        assert_ne!(current.text_color, other.text_color);
    }
}
