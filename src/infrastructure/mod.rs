// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like `FFmpeg`,
//! `cpal` and HTTP.
//!
//! # Available Adapters
//!
//! - [`audio`]: Background music engine (implements [`MusicOutput`])
//! - [`video`]: Video memory playback
//! - [`gemini`]: Story generation over the Gemini REST API (implements [`StoryGenerator`])
//! - [`ffmpeg`]: `FFmpeg` setup shared by the decoders
//!
//! [`MusicOutput`]: crate::application::port::MusicOutput
//! [`StoryGenerator`]: crate::application::port::StoryGenerator

pub mod audio;
pub mod ffmpeg;
pub mod gemini;
pub mod video;

// Re-export main types for convenience
pub use audio::{music_playback, MusicEvent, MusicPlayer};
pub use gemini::{GeminiClient, GeminiSettings};
pub use video::{video_playback, VideoEvent, VideoSession};
