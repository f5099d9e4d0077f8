// SPDX-License-Identifier: MPL-2.0
//! Custom Iced widgets.

pub mod progress_ring;
