// SPDX-License-Identifier: MPL-2.0
//! Playback core: the lightbox slideshow and the background music.
//!
//! Both state machines are pure. They never read the clock or touch a
//! device themselves: time arrives as an argument and sound goes through
//! the [`MusicOutput`](crate::application::port::MusicOutput) port.
//!
//! The shell wires them together after every coordinator transition:
//!
//! ```ignore
//! let effect = slideshow.handle(msg, Instant::now());
//! music.set_viewed_kind(slideshow.viewed_kind());
//! ```

pub mod countdown;
pub mod keys;
pub mod music;
pub mod slideshow;

pub use countdown::{Countdown, CountdownId};
pub use keys::KeyInput;
pub use music::{should_sound, BackgroundMusic};
pub use slideshow::{Effect, Message, SlideshowCoordinator, SlideshowState};
