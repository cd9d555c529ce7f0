// SPDX-License-Identifier: GPL-3.0-only

//! Live scanning page
//!
//! Renders one of three permission-gated layouts:
//! - Undetermined: neutral placeholder with a grant affordance
//! - Denied: explanation with a retry affordance
//! - Granted: the capture viewport with feedback overlays

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use crate::permission::PermissionStatus;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Border, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the scanner page for the current permission state
    pub fn build_scanner_page(&self) -> Element<'_, Message> {
        match self.permission {
            PermissionStatus::Undetermined => self.build_permission_placeholder(),
            PermissionStatus::Denied => self.build_permission_denied(),
            PermissionStatus::Granted => self.build_capture_view(),
        }
    }

    /// Neutral placeholder while authorization is unknown
    fn build_permission_placeholder(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let grant_button = if self.permission_requesting {
            widget::button::suggested(fl!("grant-permission"))
        } else {
            widget::button::suggested(fl!("grant-permission"))
                .on_press(Message::RequestPermission)
        };

        let column = widget::column()
            .push(widget::icon::from_name("camera-photo-symbolic").size(64))
            .push(widget::text::body(fl!("permission-pending")))
            .push(grant_button)
            .align_x(Alignment::Center)
            .spacing(spacing.space_m);

        centered(column.into())
    }

    /// Denied message with a retry affordance
    ///
    /// Retrying goes back through the portal; whether the user is prompted
    /// again is the portal's decision.
    fn build_permission_denied(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let retry_button = if self.permission_requesting {
            widget::button::suggested(fl!("grant-permission"))
        } else {
            widget::button::suggested(fl!("grant-permission"))
                .on_press(Message::RequestPermission)
        };

        let column = widget::column()
            .push(widget::icon::from_name("action-unavailable-symbolic").size(64))
            .push(widget::text::body(fl!("permission-denied")))
            .push(retry_button)
            .align_x(Alignment::Center)
            .spacing(spacing.space_m);

        centered(column.into())
    }

    /// The live capture viewport with scan feedback overlays
    fn build_capture_view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        // Status line inside the viewport. The scanner has no preview frames
        // to draw, so the viewport communicates stream state instead.
        let status: Element<'_, Message> = if let Some(err) = &self.capture_error {
            widget::text::body(err.clone())
                .class(cosmic::theme::Text::Color(Color::from_rgb(0.9, 0.4, 0.4)))
                .into()
        } else if let Some((width, height)) = self.capture_resolution {
            widget::text::caption(fl!(
                "viewport-streaming",
                width = width,
                height = height
            ))
            .into()
        } else {
            widget::text::caption(fl!("viewport-starting")).into()
        };

        let status_layer = widget::container(status)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center);

        let mut layers = cosmic::iced::widget::stack![status_layer]
            .width(Length::Fixed(ui::CAPTURE_VIEWPORT_SIZE))
            .height(Length::Fixed(ui::CAPTURE_VIEWPORT_SIZE));

        // Feedback overlays exist only while a result is being displayed.
        if self.session.is_consumed() {
            layers = layers.push(self.build_scan_line());
            if let Some(popup) = self.build_result_popup() {
                layers = layers.push(popup);
            }
        }

        let viewport = widget::container(layers).style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::from_rgb(0.08, 0.08, 0.08))),
            border: Border {
                radius: ui::VIEWPORT_RADIUS.into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let facing_row = widget::row()
            .push(
                widget::button::icon(widget::icon::from_name("camera-switch-symbolic"))
                    .on_press(Message::ToggleFacing),
            )
            .push(widget::text::caption(self.config.facing.display_name()))
            .align_y(Alignment::Center)
            .spacing(spacing.space_xxs);

        let column = widget::column()
            .push(widget::text::title3(fl!("scan-title")))
            .push(widget::text::caption(fl!("scan-hint")))
            .push(viewport)
            .push(facing_row)
            .align_x(Alignment::Center)
            .spacing(spacing.space_m);

        centered(column.into())
    }

    /// Looping scan-line pulse across the viewport
    fn build_scan_line(&self) -> Element<'_, Message> {
        let opacity = self.feedback.pulse_opacity();

        let line = widget::container(widget::Space::new(
            Length::Fill,
            Length::Fixed(ui::SCAN_LINE_HEIGHT),
        ))
        .width(Length::Fill)
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(Color::from_rgba(
                0.9, 0.2, 0.2, opacity,
            ))),
            ..Default::default()
        });

        widget::container(line)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_y(Alignment::Center)
            .padding([0, 12])
            .into()
    }

    /// Result popup revealed over the bottom of the viewport
    fn build_result_popup(&self) -> Option<Element<'_, Message>> {
        let result = self.session.result()?;
        let progress = self.feedback.popup_progress();
        let payload = crate::app::view::payload_preview(&result.payload);

        let text_color = Color::from_rgba(1.0, 1.0, 1.0, progress);
        let content = widget::column()
            .push(
                widget::text::caption(result.symbology.display_name())
                    .class(cosmic::theme::Text::Color(text_color)),
            )
            .push(widget::text::body(payload).class(cosmic::theme::Text::Color(text_color)))
            .align_x(Alignment::Center)
            .spacing(2);

        let popup = widget::container(content)
            .width(Length::Fill)
            .padding(8)
            .style(move |_theme| widget::container::Style {
                background: Some(Background::Color(Color::from_rgba(
                    0.0,
                    0.0,
                    0.0,
                    0.65 * progress,
                ))),
                border: Border {
                    radius: ui::VIEWPORT_RADIUS.into(),
                    ..Default::default()
                },
                ..Default::default()
            });

        Some(
            widget::container(popup)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(Alignment::End)
                .padding(8)
                .into(),
        )
    }
}

/// Center content within the page
fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    widget::container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .into()
}
