// SPDX-License-Identifier: GPL-3.0-only

//! Bottom tab bar (Logs / Scanner / Settings)

use crate::app::state::{AppModel, Message, Page};
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

fn page_label(page: Page) -> String {
    match page {
        Page::Logs => fl!("page-logs"),
        Page::Scanner => fl!("page-scanner"),
        Page::Settings => fl!("page-settings"),
    }
}

impl AppModel {
    /// Build the bottom tab bar
    ///
    /// One button per page; the active page is highlighted with the suggested
    /// button style. Selecting the active page again is a no-op in the
    /// handler.
    pub fn build_tab_bar(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let mut row = widget::row()
            .spacing(spacing.space_xs)
            .align_y(Alignment::Center);

        for page in Page::ALL {
            let label = widget::column()
                .push(widget::icon::from_name(page.icon_name()).size(24))
                .push(widget::text::caption(page_label(page)))
                .align_x(Alignment::Center)
                .spacing(spacing.space_xxxs);

            let button = widget::button::custom(label)
                .on_press(Message::SelectPage(page))
                .class(if self.page == page {
                    cosmic::theme::Button::Suggested
                } else {
                    cosmic::theme::Button::Text
                })
                .width(Length::Fill);

            row = row.push(button);
        }

        widget::container(row)
            .width(Length::Fill)
            .padding([spacing.space_xs, spacing.space_m])
            .into()
    }
}
