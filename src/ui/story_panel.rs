// SPDX-License-Identifier: MPL-2.0
//! Story panel shown under the lightbox media.
//!
//! The panel goes idle → loading → ready for the displayed memory. Every
//! state is tagged with the memory it belongs to, so a reply that arrives
//! after the user moved on is dropped.

use crate::app::i18n::fluent::I18n;
use crate::application::port::{StoryReply, StoryRequest, StoryText};
use crate::domain::media::{MediaId, MediaItem};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Column, Container, Text};
use iced::{alignment::Horizontal, Element, Length};
use tracing::debug;

/// Messages emitted by the story panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Reveal,
}

/// Story state for the displayed memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    Loading(MediaId),
    Ready { id: MediaId, text: StoryText },
}

impl State {
    /// Starts a request for `item`.
    ///
    /// Returns `None` while a story for the same memory is already loading.
    pub fn request(&mut self, item: &MediaItem) -> Option<StoryRequest> {
        if matches!(self, State::Loading(id) if id == item.id()) {
            return None;
        }
        *self = State::Loading(item.id().clone());
        Some(StoryRequest::for_item(item))
    }

    /// Shows `reply` if it answers the pending request.
    ///
    /// Returns `false` for stale replies, which are dropped.
    pub fn receive(&mut self, reply: StoryReply) -> bool {
        match self {
            State::Loading(id) if *id == reply.id => {
                *self = State::Ready {
                    id: reply.id,
                    text: reply.text,
                };
                true
            }
            _ => {
                debug!(id = %reply.id, "stale story dropped");
                false
            }
        }
    }

    /// Forgets the story unless it belongs to `current`.
    pub fn sync(&mut self, current: Option<&MediaId>) {
        let keep = match self {
            State::Idle => true,
            State::Loading(id) | State::Ready { id, .. } => Some(&*id) == current,
        };
        if !keep {
            *self = State::Idle;
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, State::Loading(_))
    }
}

/// Contextual data needed to render the story panel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

/// Render the story panel.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let (label, on_press) = if ctx.state.is_loading() {
        (ctx.i18n.tr("story-loading"), None)
    } else {
        (ctx.i18n.tr("story-reveal"), Some(Message::Reveal))
    };
    let reveal = button(Text::new(label).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary)
        .on_press_maybe(on_press);

    let mut column = Column::new()
        .spacing(spacing::SM)
        .align_x(Horizontal::Center)
        .push(reveal);

    if let State::Ready { text, .. } = ctx.state {
        let story = match text {
            StoryText::Story(story) => story.clone(),
            StoryText::Fallback(key) => ctx.i18n.tr(key),
        };
        column = column.push(
            Container::new(Text::new(story).size(typography::BODY))
                .padding(spacing::MD)
                .max_width(sizing::STORY_PANEL_WIDTH)
                .style(styles::container::panel),
        );
    }

    Container::new(column)
        .width(Length::Fill)
        .align_x(Horizontal::Center)
        .into()
}
