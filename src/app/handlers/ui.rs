// SPDX-License-Identifier: GPL-3.0-only

//! UI Navigation handlers
//!
//! Handles page selection, the context drawer, and URL launching.

use crate::app::state::{AppModel, ContextPage, Message, Page};
use cosmic::Task;
use tracing::{debug, error};

impl AppModel {
    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        match open::that_detached(&url) {
            Ok(()) => {}
            Err(err) => {
                error!(url = %url, error = %err, "Failed to open URL");
            }
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    /// Switch pages from the tab bar.
    ///
    /// Leaving the scanner page drops the capture subscription; the session
    /// itself is kept, so a displayed result survives a round trip through
    /// another tab until the user dismisses it.
    pub(crate) fn handle_select_page(&mut self, page: Page) -> Task<cosmic::Action<Message>> {
        if self.page != page {
            debug!(?page, "Switching page");
            self.page = page;
        }
        Task::none()
    }
}
