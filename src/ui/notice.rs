// SPDX-License-Identifier: MPL-2.0
//! One-line warning banner (unreadable settings, missing audio device...).

use crate::app::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Container, Row, Text};
use iced::{alignment::Vertical, Element, Length};

/// Messages emitted by the notice banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Dismiss,
}

/// Render the banner for the i18n key `key`.
pub fn view<'a>(i18n: &I18n, key: &str) -> Element<'a, Message> {
    let row = Row::new()
        .spacing(spacing::MD)
        .align_y(Vertical::Center)
        .push(
            Text::new(i18n.tr(key))
                .size(typography::BODY)
                .width(Length::Fill),
        )
        .push(
            button(Text::new(i18n.tr("notice-dismiss")).size(typography::CAPTION))
                .on_press(Message::Dismiss)
                .style(styles::button::unselected),
        );

    Container::new(row)
        .padding([spacing::XS, spacing::MD])
        .width(Length::Fill)
        .style(styles::container::notice)
        .into()
}
