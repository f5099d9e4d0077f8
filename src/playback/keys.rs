// SPDX-License-Identifier: MPL-2.0
//! Inputs the lightbox reacts to.
//!
//! Keyboard keys and pointer gestures both resolve to a [`KeyInput`], so the
//! arrow buttons, the backdrop and the keyboard share one code path.

/// A lightbox command from the keyboard or the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Escape, close button, backdrop click.
    Escape,
    /// Right arrow, "next" button.
    Right,
    /// Left arrow, "previous" button.
    Left,
    /// Space, slideshow play/pause button.
    Space,
}
