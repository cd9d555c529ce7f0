// SPDX-License-Identifier: GPL-3.0-only

//! Settings page

use crate::app::state::{AppModel, FACING_OPTIONS, LOG_LIMIT_OPTIONS, Message};
use crate::config::AppTheme;
use crate::constants::app_info;
use crate::fl;
use cosmic::Element;
use cosmic::iced::Length;
use cosmic::widget;

impl AppModel {
    /// Build the settings page
    pub fn build_settings_page(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let theme_index = match self.config.app_theme {
            AppTheme::System => 0,
            AppTheme::Dark => 1,
            AppTheme::Light => 2,
        };
        let theme_dropdown = widget::dropdown(
            &self.theme_dropdown_options,
            Some(theme_index),
            Message::SetAppTheme,
        );

        let facing_index = FACING_OPTIONS
            .iter()
            .position(|facing| *facing == self.config.facing);
        let facing_dropdown = widget::dropdown(
            &self.facing_dropdown_options,
            facing_index,
            Message::SelectFacing,
        );

        let limit_index = LOG_LIMIT_OPTIONS
            .iter()
            .position(|limit| *limit == self.config.log_limit);
        let limit_dropdown = widget::dropdown(
            &self.log_limit_dropdown_options,
            limit_index,
            Message::SelectLogLimit,
        );

        // Version info string
        let version_info = if app_info::is_flatpak() {
            format!("Version {} (Flatpak)", app_info::version())
        } else {
            format!("Version {}", app_info::version())
        };

        let settings_column: Element<'_, Message> = widget::column()
            .push(widget::text::title3(fl!("page-settings")))
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(fl!("settings-appearance"))
                    .size(16)
                    .font(cosmic::font::bold()),
            )
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(theme_dropdown)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(fl!("settings-camera"))
                    .size(16)
                    .font(cosmic::font::bold()),
            )
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(facing_dropdown)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(fl!("settings-log"))
                    .size(16)
                    .font(cosmic::font::bold()),
            )
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(limit_dropdown)
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(
                widget::button::standard(fl!("clear-log")).on_press(Message::ClearHistory),
            )
            .push(widget::vertical_space().height(spacing.space_m))
            .push(widget::text::caption(version_info))
            .padding(spacing.space_m)
            .into();

        widget::scrollable(settings_column)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
