// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports between the playback core and the outside world.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The playback core and the presentation layer use the ports
//!
//! # Example
//!
//! ```ignore
//! use wonder_lens::application::port::MusicOutput;
//!
//! // Infrastructure implements the port trait
//! struct MusicPlayer { /* ... */ }
//! impl MusicOutput for MusicPlayer { /* ... */ }
//! ```

pub mod port;
