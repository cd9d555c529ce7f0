// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! Composes the selected page with the bottom tab bar:
//! - Scanner page (scanner_page module)
//! - Scan log viewer (logs_page module)
//! - Settings page (settings_page module)
//! - Tab bar (tab_bar module)

use crate::app::state::{AppModel, Message, Page};
use crate::constants::ui;
use cosmic::Element;
use cosmic::iced::Length;
use cosmic::widget;

/// Shorten a payload for display, keeping the cut on a UTF-8 char boundary
///
/// Payload content is unconstrained, so a byte-indexed cut could land inside
/// a multibyte character.
pub(crate) fn payload_preview(payload: &str) -> String {
    if payload.len() <= ui::LOG_PAYLOAD_PREVIEW {
        return payload.to_string();
    }

    let mut cut = ui::LOG_PAYLOAD_PREVIEW;
    while !payload.is_char_boundary(cut) {
        cut -= 1;
    }

    let mut preview = payload[..cut].to_string();
    preview.push('\u{2026}');
    preview
}

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let content = match self.page {
            Page::Logs => self.build_logs_page(),
            Page::Scanner => self.build_scanner_page(),
            Page::Settings => self.build_settings_page(),
        };

        widget::column()
            .push(
                widget::container(content)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .push(self.build_tab_bar())
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_payload_passes_through() {
        assert_eq!(payload_preview("ABC123"), "ABC123");
    }

    #[test]
    fn long_ascii_payload_is_cut_with_ellipsis() {
        let payload = "x".repeat(200);
        let preview = payload_preview(&payload);
        assert_eq!(preview.chars().count(), ui::LOG_PAYLOAD_PREVIEW + 1);
        assert!(preview.ends_with('\u{2026}'));
    }

    #[test]
    fn multibyte_payload_does_not_split_characters() {
        // 33 snowmen are 99 bytes; byte 64 falls inside a character.
        let payload = "\u{2603}".repeat(33);
        let preview = payload_preview(&payload);
        assert!(preview.len() <= ui::LOG_PAYLOAD_PREVIEW + '\u{2026}'.len_utf8());
        assert!(preview.chars().all(|c| c == '\u{2603}' || c == '\u{2026}'));
    }

    #[test]
    fn mixed_payload_stays_valid_utf8() {
        let payload = format!("https://example.com/{}", "\u{00e9}".repeat(60));
        let preview = payload_preview(&payload);
        assert!(preview.is_char_boundary(preview.len() - '\u{2026}'.len_utf8()));
    }
}
