// SPDX-License-Identifier: MPL-2.0
//! Background music engine: `FFmpeg` decoding into a `cpal` output.
//!
//! - [`decoder`]: per-track decoding thread with paced delivery
//! - [`output`]: device stream and bounded sample buffer
//! - [`engine`]: the thread that owns both and answers [`MusicCommand`]s
//! - [`player`]: the [`MusicOutput`](crate::application::port::MusicOutput)
//!   adapter used by the controller
//! - [`subscription`]: Iced glue delivering [`MusicEvent`]s

pub mod decoder;
pub mod engine;
pub mod output;
pub mod player;
pub mod subscription;

pub use engine::{MusicCommand, MusicEvent, MusicHandle, PROGRESS_INTERVAL};
pub use player::MusicPlayer;
pub use subscription::music_playback;
