// SPDX-License-Identifier: GPL-3.0-only

//! Scan session and permission gate handlers
//!
//! Covers the camera authorization flow, capture surface lifecycle events,
//! and the Armed/Consumed scan session.

use crate::app::state::{AppModel, Message, ScanResult};
use crate::capture::DecodeEvent;
use crate::history::ScanRecord;
use crate::permission::{self, PermissionStatus};
use cosmic::Task;
use tracing::{debug, info, warn};

impl AppModel {
    pub(crate) fn handle_permission_checked(
        &mut self,
        status: PermissionStatus,
    ) -> Task<cosmic::Action<Message>> {
        info!(?status, "Camera authorization probed");
        self.permission = status;
        Task::none()
    }

    /// Launch the interactive portal consent flow.
    ///
    /// Triggered from both the initial grant affordance and the retry
    /// affordance after a denial; the portal decides whether the user is
    /// actually prompted again.
    pub(crate) fn handle_request_permission(&mut self) -> Task<cosmic::Action<Message>> {
        if self.permission_requesting {
            return Task::none();
        }

        self.permission_requesting = true;
        Task::perform(
            async { permission::request().await.map_err(|err| err.to_string()) },
            |result| cosmic::Action::App(Message::PermissionRequested(result)),
        )
    }

    pub(crate) fn handle_permission_requested(
        &mut self,
        result: Result<PermissionStatus, String>,
    ) -> Task<cosmic::Action<Message>> {
        self.permission_requesting = false;

        match result {
            Ok(status) => {
                info!(?status, "Camera authorization request finished");
                self.permission = status;
            }
            Err(err) => {
                // Portal unavailable or the dialog was dismissed. Keep the
                // retry affordance visible rather than pretending a decision
                // was made.
                warn!(error = %err, "Camera authorization request failed");
                self.permission = PermissionStatus::Denied;
            }
        }
        Task::none()
    }

    pub(crate) fn handle_capture_opened(
        &mut self,
        width: u32,
        height: u32,
    ) -> Task<cosmic::Action<Message>> {
        info!(width, height, "Capture surface streaming");
        self.capture_resolution = Some((width, height));
        self.capture_error = None;
        Task::none()
    }

    pub(crate) fn handle_capture_failed(&mut self, err: String) -> Task<cosmic::Action<Message>> {
        warn!(error = %err, "Capture surface failed");
        self.capture_resolution = None;
        self.capture_error = Some(err);
        Task::none()
    }

    /// A code was decoded from the live stream.
    ///
    /// The session gate decides whether the event counts: exactly one decode
    /// per Armed period is accepted, and anything still queued from the same
    /// frame burst is absorbed here.
    pub(crate) fn handle_code_decoded(
        &mut self,
        event: DecodeEvent,
    ) -> Task<cosmic::Action<Message>> {
        let result = ScanResult::from(event);
        let record = ScanRecord::new(result.payload.clone(), result.symbology);

        if !self.session.accept(result) {
            debug!("Decode event ignored, session already consumed");
            return Task::none();
        }

        info!(symbology = %record.symbology, "Scan accepted");
        self.feedback.start();
        self.history.push(record, self.config.log_limit);
        self.save_history()
    }

    /// Flip between back and front cameras.
    ///
    /// The facing change is persisted; the capture subscription restarts on
    /// its own because the facing is part of its identity.
    pub(crate) fn handle_toggle_facing(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.facing = self.config.facing.toggled();
        info!(facing = %self.config.facing, "Camera facing toggled");
        self.save_config();
        Task::none()
    }

    /// Dismiss the result modal and re-arm the session.
    pub(crate) fn handle_scan_again(&mut self) -> Task<cosmic::Action<Message>> {
        debug!("Session re-armed");
        self.session.reset();
        self.feedback.stop();
        Task::none()
    }
}
