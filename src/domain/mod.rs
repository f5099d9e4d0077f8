// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`media`]: Memory types ([`MediaItem`](media::MediaItem), [`MediaKind`](media::MediaKind))
//! - [`music`]: Background music types ([`Track`](music::Track), [`Volume`](music::Volume))
//! - [`ui`]: UI value objects ([`ProgressPercent`](ui::ProgressPercent),
//!   [`SlideDuration`](ui::SlideDuration))

pub mod media;
pub mod music;
pub mod ui;
