// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::capture::{DecodeEvent, Facing, FrameRegion, Symbology};
use crate::config::Config;
use crate::constants::{POPUP_REVEAL_DURATION, SCAN_PULSE_PERIOD};
use crate::history::ScanHistory;
use crate::permission::PermissionStatus;
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use std::time::Instant;

/// An accepted scan
///
/// Immutable once created; replaced wholesale when a new session accepts a
/// decode. Payload content is not validated here.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    /// Decoded payload, verbatim
    pub payload: String,
    /// Code family that produced the payload
    pub symbology: Symbology,
    /// Bounding box in normalized frame coordinates, when reported
    pub bounds: Option<FrameRegion>,
}

impl From<DecodeEvent> for ScanResult {
    fn from(event: DecodeEvent) -> Self {
        Self {
            payload: event.payload,
            symbology: event.symbology,
            bounds: event.bounds,
        }
    }
}

/// Scan session state machine
///
/// Two states: Armed accepts the next decode event, Consumed holds the
/// accepted result and ignores everything until an explicit reset. The
/// decode-event subscription is only wired while Armed, so this gate is the
/// single source of truth for both debouncing and wiring.
#[derive(Debug, Default)]
pub enum ScanSession {
    /// Waiting for the next decode event
    #[default]
    Armed,
    /// A result has been accepted; decode events are suppressed
    Consumed {
        /// The accepted scan
        result: ScanResult,
    },
}

impl ScanSession {
    pub fn is_armed(&self) -> bool {
        matches!(self, ScanSession::Armed)
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self, ScanSession::Consumed { .. })
    }

    /// The live result, if any
    pub fn result(&self) -> Option<&ScanResult> {
        match self {
            ScanSession::Armed => None,
            ScanSession::Consumed { result } => Some(result),
        }
    }

    /// Accept a decode event
    ///
    /// Returns true when the event was accepted. While Consumed this is a
    /// no-op, which absorbs duplicate events still queued from the same
    /// frame burst.
    pub fn accept(&mut self, result: ScanResult) -> bool {
        match self {
            ScanSession::Armed => {
                *self = ScanSession::Consumed { result };
                true
            }
            ScanSession::Consumed { .. } => false,
        }
    }

    /// Return to Armed, discarding any stored result
    ///
    /// Only ever triggered by the user's "Scan Again" action.
    pub fn reset(&mut self) {
        *self = ScanSession::Armed;
    }
}

/// Feedback presenter state
///
/// Purely cosmetic: a one-shot popup reveal and a looping scan-line pulse,
/// both computed from the time the session was consumed. The tick
/// subscription that redraws these exists only while a result is displayed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackState {
    started_at: Option<Instant>,
}

impl FeedbackState {
    /// Start animations (on transition to Consumed)
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Stop animations (on transition to Armed); no exit animation
    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Popup reveal progress, 0.0 (hidden) to 1.0 (fully revealed)
    pub fn popup_progress(&self) -> f32 {
        let Some(started) = self.started_at else {
            return 0.0;
        };

        let elapsed = started.elapsed().as_secs_f32();
        (elapsed / POPUP_REVEAL_DURATION.as_secs_f32()).min(1.0)
    }

    /// Scan-line opacity: triangle wave, 0.0 -> 1.0 -> 0.0 per period
    pub fn pulse_opacity(&self) -> f32 {
        let Some(started) = self.started_at else {
            return 0.0;
        };

        let period = SCAN_PULSE_PERIOD.as_secs_f32();
        let phase = (started.elapsed().as_secs_f32() % period) / period;
        1.0 - (2.0 * phase - 1.0).abs()
    }
}

/// Top-level pages selected by the bottom tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Page {
    /// Scan log viewer
    Logs,
    /// QR scanning page
    #[default]
    Scanner,
    /// Settings page
    Settings,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Logs, Page::Scanner, Page::Settings];

    /// Symbolic icon name for the tab bar
    pub fn icon_name(&self) -> &'static str {
        match self {
            Page::Logs => "text-x-generic-symbolic",
            Page::Scanner => "view-grid-symbolic",
            Page::Settings => "preferences-system-symbolic",
        }
    }
}

/// The context page to display in the context drawer
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
}

/// The application model stores app-specific state used to describe its
/// interface and drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined
    pub context_page: ContextPage,
    /// The about page for this app
    pub about: About,
    /// Configuration data that persists between application runs
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,
    /// Currently selected page
    pub page: Page,
    /// Camera authorization status
    pub permission: PermissionStatus,
    /// Whether a portal permission request is in flight
    pub permission_requesting: bool,
    /// Scan session state machine (Armed / Consumed)
    pub session: ScanSession,
    /// Feedback animations keyed off session transitions
    pub feedback: FeedbackState,
    /// Resolution reported by the capture surface once streaming
    pub capture_resolution: Option<(u32, u32)>,
    /// Last capture surface failure, if any (surface retries on its own)
    pub capture_error: Option<String>,
    /// Persisted scan log backing the Logs page
    pub history: ScanHistory,
    /// Dropdown options (cached for UI)
    pub theme_dropdown_options: Vec<String>,
    pub facing_dropdown_options: Vec<String>,
    pub log_limit_dropdown_options: Vec<String>,
}

/// Messages emitted by the application and its widgets.
///
/// Messages are organized into logical groups:
/// - **UI Navigation**: page selection and context drawer
/// - **Permission Gate**: status probes and portal requests
/// - **Scan Session**: decode events, feedback, reset
/// - **Scan Log**: history loading, clearing, link opening
/// - **Settings**: configuration changes
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, scanned link, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page (About)
    ToggleContextPage(ContextPage),
    /// Select a page from the tab bar
    SelectPage(Page),

    // ===== Permission Gate =====
    /// Non-interactive permission probe finished
    PermissionChecked(PermissionStatus),
    /// User tapped the grant/retry affordance
    RequestPermission,
    /// Portal consent flow finished
    PermissionRequested(Result<PermissionStatus, String>),

    // ===== Scan Session =====
    /// Capture surface opened the camera and is streaming
    CaptureOpened { width: u32, height: u32 },
    /// Capture surface failed (it retries on its own)
    CaptureFailed(String),
    /// Capture surface decoded a code from the live stream
    CodeDecoded(DecodeEvent),
    /// Flip between back and front cameras
    ToggleFacing,
    /// User acknowledged the result and wants to scan again
    ScanAgain,
    /// Redraw tick while feedback animations are running
    FeedbackTick,

    // ===== Scan Log =====
    /// Persisted scan log finished loading at startup
    HistoryLoaded(ScanHistory),
    /// Scan log persistence finished
    HistorySaved(Result<(), String>),
    /// Clear the scan log
    ClearHistory,

    // ===== Settings =====
    /// Configuration updated externally (cosmic-settings-daemon watch)
    UpdateConfig(Config),
    /// Select application theme by dropdown index
    SetAppTheme(usize),
    /// Select camera facing by dropdown index
    SelectFacing(usize),
    /// Select scan log limit by dropdown index
    SelectLogLimit(usize),
}

/// Facing options in dropdown order
pub const FACING_OPTIONS: [Facing; 2] = [Facing::Back, Facing::Front];

/// Scan log limit options in dropdown order
pub const LOG_LIMIT_OPTIONS: [u32; 4] = [25, 50, 100, 500];

#[cfg(test)]
mod tests {
    use super::*;

    fn result(payload: &str) -> ScanResult {
        ScanResult {
            payload: payload.to_string(),
            symbology: Symbology::Qr,
            bounds: None,
        }
    }

    #[test]
    fn session_starts_armed_without_result() {
        let session = ScanSession::default();
        assert!(session.is_armed());
        assert!(session.result().is_none());
    }

    #[test]
    fn first_decode_is_accepted_and_stored() {
        let mut session = ScanSession::default();
        assert!(session.accept(result("ABC123")));
        assert!(session.is_consumed());
        assert_eq!(session.result().unwrap().payload, "ABC123");
        assert_eq!(session.result().unwrap().symbology, Symbology::Qr);
    }

    #[test]
    fn events_while_consumed_are_ignored() {
        let mut session = ScanSession::default();
        assert!(session.accept(result("ABC123")));

        // Same frame burst may deliver more events; all must be dropped.
        assert!(!session.accept(result("XYZ999")));
        assert!(!session.accept(result("ABC123")));
        assert_eq!(session.result().unwrap().payload, "ABC123");
    }

    #[test]
    fn reset_returns_to_armed_and_discards_result() {
        let mut session = ScanSession::default();
        session.accept(result("ABC123"));

        session.reset();
        assert!(session.is_armed());
        assert!(session.result().is_none());

        // Next decode after reset is accepted again.
        assert!(session.accept(result("XYZ999")));
        assert_eq!(session.result().unwrap().payload, "XYZ999");
    }

    #[test]
    fn reset_on_armed_session_is_harmless() {
        let mut session = ScanSession::default();
        session.reset();
        assert!(session.is_armed());
    }

    #[test]
    fn feedback_absent_until_started() {
        let feedback = FeedbackState::default();
        assert!(!feedback.is_active());
        assert_eq!(feedback.popup_progress(), 0.0);
        assert_eq!(feedback.pulse_opacity(), 0.0);
    }

    #[test]
    fn feedback_active_after_start_and_absent_after_stop() {
        let mut feedback = FeedbackState::default();
        feedback.start();
        assert!(feedback.is_active());

        feedback.stop();
        assert!(!feedback.is_active());
        assert_eq!(feedback.popup_progress(), 0.0);
    }

    #[test]
    fn popup_progress_is_clamped() {
        let mut feedback = FeedbackState::default();
        feedback.start();
        let progress = feedback.popup_progress();
        assert!((0.0..=1.0).contains(&progress));
    }

    #[test]
    fn pulse_opacity_stays_in_range() {
        let mut feedback = FeedbackState::default();
        feedback.start();
        let opacity = feedback.pulse_opacity();
        assert!((0.0..=1.0).contains(&opacity));
    }
}
