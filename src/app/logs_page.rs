// SPDX-License-Identifier: GPL-3.0-only

//! Scan log viewer page

use crate::app::state::{AppModel, Message};
use crate::fl;
use crate::history::ScanRecord;
use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

impl AppModel {
    /// Build the scan log page
    ///
    /// Records are shown newest first. Payloads that look like links get an
    /// open-in-browser affordance.
    pub fn build_logs_page(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let mut header = widget::row()
            .push(widget::text::title3(fl!("page-logs")))
            .push(widget::horizontal_space().width(Length::Fill))
            .align_y(Alignment::Center);

        if !self.history.is_empty() {
            header = header.push(
                widget::button::standard(fl!("clear-log")).on_press(Message::ClearHistory),
            );
        }

        let body: Element<'_, Message> = if self.history.is_empty() {
            widget::container(
                widget::column()
                    .push(widget::icon::from_name("text-x-generic-symbolic").size(64))
                    .push(widget::text::body(fl!("log-empty")))
                    .align_x(Alignment::Center)
                    .spacing(spacing.space_s),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center)
            .into()
        } else {
            let mut list = widget::column().spacing(spacing.space_xs);
            for record in self.history.records() {
                list = list.push(build_log_row(record));
            }

            widget::scrollable(widget::container(list).padding([0, spacing.space_xxs]))
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        };

        widget::column()
            .push(header)
            .push(body)
            .spacing(spacing.space_s)
            .padding(spacing.space_m)
            .into()
    }
}

fn build_log_row(record: &ScanRecord) -> Element<'_, Message> {
    let spacing = cosmic::theme::spacing();

    let payload = crate::app::view::payload_preview(&record.payload);

    let details = widget::row()
        .push(widget::text::caption(
            record.symbology.display_name().to_string(),
        ))
        .push(widget::text::caption(
            record.scanned_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ))
        .spacing(spacing.space_s);

    let mut row = widget::row()
        .push(
            widget::column()
                .push(widget::text::body(payload))
                .push(details)
                .spacing(spacing.space_xxxs)
                .width(Length::Fill),
        )
        .align_y(Alignment::Center)
        .spacing(spacing.space_xs);

    if record.is_link() {
        row = row.push(
            widget::button::icon(widget::icon::from_name("web-browser-symbolic"))
                .on_press(Message::LaunchUrl(record.payload.clone())),
        );
    }

    widget::container(row)
        .class(cosmic::theme::Container::Card)
        .padding(spacing.space_s)
        .width(Length::Fill)
        .into()
}
