// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! This module handles all application messages by routing them to focused handler methods.
//! The main `handle_message()` function acts as a dispatcher, while specific handlers are
//! implemented in the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::ui`: Page navigation, context drawer, URL launching
//! - `handlers::scan`: Permission gate, capture events, scan session
//! - `handlers::settings`: Configuration changes, scan log maintenance

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    ///
    /// This dispatcher pattern keeps the main update function clean and makes
    /// it easy to find the handling code for any message type.
    pub fn handle_message(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::SelectPage(page) => self.handle_select_page(page),

            // ===== Permission Gate =====
            Message::PermissionChecked(status) => self.handle_permission_checked(status),
            Message::RequestPermission => self.handle_request_permission(),
            Message::PermissionRequested(result) => self.handle_permission_requested(result),

            // ===== Scan Session =====
            Message::CaptureOpened { width, height } => self.handle_capture_opened(width, height),
            Message::CaptureFailed(err) => self.handle_capture_failed(err),
            Message::CodeDecoded(event) => self.handle_code_decoded(event),
            Message::ToggleFacing => self.handle_toggle_facing(),
            Message::ScanAgain => self.handle_scan_again(),
            Message::FeedbackTick => Task::none(),

            // ===== Scan Log =====
            Message::HistoryLoaded(history) => self.handle_history_loaded(history),
            Message::HistorySaved(result) => self.handle_history_saved(result),
            Message::ClearHistory => self.handle_clear_history(),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
            Message::SelectFacing(index) => self.handle_select_facing(index),
            Message::SelectLogLimit(index) => self.handle_select_log_limit(index),
        }
    }
}
