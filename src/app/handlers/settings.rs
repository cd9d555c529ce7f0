// SPDX-License-Identifier: GPL-3.0-only

//! Settings and scan log maintenance handlers

use crate::app::state::{AppModel, FACING_OPTIONS, LOG_LIMIT_OPTIONS, Message};
use crate::config::AppTheme;
use crate::history::ScanHistory;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use tracing::{error, info, warn};

impl AppModel {
    pub(crate) fn handle_update_config(
        &mut self,
        config: crate::config::Config,
    ) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        self.config = config;

        // An external change can lower the log limit; apply the new cap the
        // same way a local selection does.
        let theme_task = cosmic::command::set_theme(self.config.app_theme.theme());
        if self.history.len() > self.config.log_limit as usize {
            self.history.truncate(self.config.log_limit);
            return Task::batch([theme_task, self.save_history()]);
        }
        theme_task
    }

    pub(crate) fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let app_theme = match index {
            0 => AppTheme::System,
            1 => AppTheme::Dark,
            2 => AppTheme::Light,
            _ => return Task::none(),
        };

        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;
        self.save_config();

        cosmic::command::set_theme(app_theme.theme())
    }

    pub(crate) fn handle_select_facing(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(facing) = FACING_OPTIONS.get(index).copied() else {
            return Task::none();
        };

        info!(%facing, "Camera facing selected");
        self.config.facing = facing;
        self.save_config();
        Task::none()
    }

    pub(crate) fn handle_select_log_limit(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(limit) = LOG_LIMIT_OPTIONS.get(index).copied() else {
            return Task::none();
        };

        info!(limit, "Scan log limit selected");
        self.config.log_limit = limit;
        self.save_config();

        // Apply the new cap to the in-memory log right away.
        if self.history.len() > limit as usize {
            self.history.truncate(limit);
            return self.save_history();
        }
        Task::none()
    }

    pub(crate) fn handle_history_loaded(
        &mut self,
        history: ScanHistory,
    ) -> Task<cosmic::Action<Message>> {
        info!(count = history.len(), "Scan log loaded");
        self.history = history;
        Task::none()
    }

    pub(crate) fn handle_history_saved(
        &mut self,
        result: Result<(), String>,
    ) -> Task<cosmic::Action<Message>> {
        if let Err(err) = result {
            error!(error = %err, "Failed to persist scan log");
        }
        Task::none()
    }

    pub(crate) fn handle_clear_history(&mut self) -> Task<cosmic::Action<Message>> {
        info!(count = self.history.len(), "Clearing scan log");
        self.history.clear();
        self.save_history()
    }

    pub(crate) fn save_config(&self) {
        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            warn!(?err, "Failed to save config");
        }
    }

    /// Persist the current scan log off the UI thread.
    pub(crate) fn save_history(&self) -> Task<cosmic::Action<Message>> {
        let snapshot = self.history.clone();
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || snapshot.save())
                    .await
                    .unwrap_or_else(|err| Err(err.to_string()))
            },
            |result| cosmic::Action::App(Message::HistorySaved(result)),
        )
    }
}
