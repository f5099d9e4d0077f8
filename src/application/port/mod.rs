// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`audio`]: The background music output
//! - [`story`]: Generative captions for memories
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles, no `cpal` or `reqwest` types)
//! - [`MusicOutput`] is synchronous and driven from the UI thread
//! - [`StoryGenerator`] returns a `Send` future that callers wrap in an Iced `Task`

pub mod audio;
pub mod story;

// Re-export main types for convenience
pub use audio::MusicOutput;
pub use story::{StoryGenerator, StoryReply, StoryRequest, StoryService, StoryText};
