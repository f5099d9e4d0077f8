// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation file loading, and string formatting.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Translation files embedded into the binary
//! - Fallback to `en-US` when the requested locale is not shipped
//! - Missing keys render as `MISSING: <key>`

pub mod fluent;
