// SPDX-License-Identifier: MPL-2.0
//! Presentation shell.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! one renders from a `ViewContext` and emits its own `Message`, which the
//! application maps into its top-level message.
//!
//! # Screens
//!
//! - [`gallery`] - Hero header and grid of memory cards
//! - [`lightbox`] - One memory at a time, slideshow and story
//!
//! # Components
//!
//! - [`navbar`] - Brand, "Play", music controls and fullscreen toggle
//! - [`music_controls`] - Music toggle, next track, playlist and progress bar
//! - [`story_panel`] - "Reveal Story" button and the generated text
//! - [`video_player`] - Video frames and play/pause for video memories
//! - [`notice`] - Warning banner
//!
//! # Shared Infrastructure
//!
//! - [`photo_cache`] - Remote photos decoded into an LRU
//! - [`widgets`] - Custom Iced widgets (progress ring)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod gallery;
pub mod lightbox;
pub mod music_controls;
pub mod navbar;
pub mod notice;
pub mod photo_cache;
pub mod story_panel;
pub mod styles;
pub mod video_player;
pub mod widgets;
