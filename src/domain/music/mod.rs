// SPDX-License-Identifier: MPL-2.0
//! Background music domain types.

pub mod types;

pub use types::{Track, Volume};
