// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

This module defines all of the gallery's design tokens, following the W3C Design Tokens standard.

## Organization

- **Palette**: Base colors (night sky slate, indigo and purple accents)
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Border**: Border width scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use wonder_lens::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

// Create a backdrop color
let backdrop = Color {
    a: opacity::BACKDROP,
    ..palette::SLATE_950
};

// Use the spacing scale
let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;

    // Night sky (slate scale)
    pub const SLATE_950: Color = Color::from_rgb(0.008, 0.024, 0.090);
    pub const SLATE_900: Color = Color::from_rgb(0.059, 0.090, 0.165);
    pub const SLATE_800: Color = Color::from_rgb(0.118, 0.161, 0.231);
    pub const SLATE_700: Color = Color::from_rgb(0.200, 0.255, 0.333);
    pub const SLATE_500: Color = Color::from_rgb(0.392, 0.455, 0.545);
    pub const SLATE_400: Color = Color::from_rgb(0.580, 0.639, 0.722);
    pub const SLATE_200: Color = Color::from_rgb(0.886, 0.910, 0.941);

    // Brand colors (indigo scale)
    pub const INDIGO_200: Color = Color::from_rgb(0.780, 0.824, 0.996);
    pub const INDIGO_400: Color = Color::from_rgb(0.506, 0.549, 0.973);
    pub const INDIGO_500: Color = Color::from_rgb(0.388, 0.400, 0.945);
    pub const INDIGO_600: Color = Color::from_rgb(0.310, 0.275, 0.898);

    // Accents
    pub const PURPLE_400: Color = Color::from_rgb(0.753, 0.518, 0.988);
    pub const AMBER_400: Color = Color::from_rgb(0.984, 0.749, 0.141);

    // Semantic colors
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_HOVER: f32 = 0.8;
    pub const OVERLAY_PRESSED: f32 = 0.9;

    /// Lightbox backdrop over the gallery
    pub const BACKDROP: f32 = 0.95;

    /// Surface background - Semi-transparent panels and cards
    pub const SURFACE: f32 = 0.85;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
    pub const XL: f32 = 32.0; // 4 units
    pub const XXL: f32 = 48.0; // 6 units
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    // Icon sizes
    pub const ICON_MD: f32 = 24.0;
    pub const ICON_XL: f32 = 48.0;

    // Gallery
    pub const CARD_IMAGE_HEIGHT: f32 = 240.0;
    pub const CONTENT_MAX_WIDTH: f32 = 1200.0;

    // Lightbox
    /// Diameter of the slideshow progress ring
    pub const PROGRESS_RING: f32 = 40.0;
    /// Height of the music progress bar
    pub const MUSIC_PROGRESS_BAR: f32 = 4.0;
    pub const STORY_PANEL_WIDTH: f32 = 420.0;
    pub const PLAYLIST_WIDTH: f32 = 240.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    //! Font size scale.
    //!
    //! - Titles: hero headline, album name, lightbox title
    //! - Body: primary content text
    //! - Caption: dates, badges, small info

    /// Hero headline above the gallery
    pub const DISPLAY: f32 = 44.0;

    /// Large title - Album subtitle, lightbox item title
    pub const TITLE_LG: f32 = 30.0;

    /// Medium title - App name in the navbar
    pub const TITLE_MD: f32 = 20.0;

    /// Small title - Card titles
    pub const TITLE_SM: f32 = 18.0;

    /// Standard body - Most UI text, labels, stories
    pub const BODY: f32 = 14.0;

    /// Caption - Badges, dates, small info
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    /// Thin border - Card outlines, separators
    pub const WIDTH_SM: f32 = 1.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const XL: f32 = 24.0;
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };

    pub const LG: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 16.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    // Spacing validation
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    // Opacity validation
    assert!(opacity::OVERLAY_MEDIUM > 0.0 && opacity::OVERLAY_MEDIUM < 1.0);
    assert!(opacity::BACKDROP > opacity::SURFACE);

    // Sizing validation
    assert!(sizing::ICON_XL > sizing::ICON_MD);
    assert!(sizing::PROGRESS_RING > sizing::ICON_MD);

    // Typography validation
    assert!(typography::DISPLAY > typography::TITLE_LG);
    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::BODY > typography::CAPTION);

    // Border validation
    assert!(border::WIDTH_SM > 0.0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }

    #[test]
    fn brand_colors_are_normalized() {
        for color in [palette::INDIGO_500, palette::PURPLE_400, palette::AMBER_400] {
            assert!((0.0..=1.0).contains(&color.r));
            assert!((0.0..=1.0).contains(&color.g));
            assert!((0.0..=1.0).contains(&color.b));
        }
    }
}
