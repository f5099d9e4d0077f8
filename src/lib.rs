// SPDX-License-Identifier: MPL-2.0
//! `wonder_lens` is a memory gallery built with the Iced GUI framework.
//!
//! It shows an album of photos and videos, plays them as a timed slideshow
//! in a lightbox, keeps a looping background track that steps aside while
//! a video is on screen, and asks a generative model for short stories
//! about each memory.

pub mod app;
pub mod application;
pub mod catalog;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod playback;
pub mod ui;

#[cfg(test)]
mod test_utils;
