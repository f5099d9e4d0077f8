// SPDX-License-Identifier: MPL-2.0
//! Video memories: `FFmpeg` frame decoding with the soundtrack played
//! through `cpal`.
//!
//! - [`decoder`]: per-video decoding thread delivering paced RGBA frames
//! - [`engine`]: the thread that owns the frame decoder and the soundtrack
//! - [`subscription`]: Iced glue delivering [`VideoEvent`]s per session

pub mod decoder;
pub mod engine;
pub mod subscription;

pub use decoder::VideoFrame;
pub use engine::{VideoCommand, VideoEvent, VideoHandle};
pub use subscription::{video_playback, VideoSession};
