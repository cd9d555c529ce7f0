// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// How long the result popup takes to fully reveal after a scan is accepted
pub const POPUP_REVEAL_DURATION: Duration = Duration::from_millis(500);

/// Full period of the looping scan-line pulse (fade in + fade out)
pub const SCAN_PULSE_PERIOD: Duration = Duration::from_millis(1000);

/// Redraw cadence for feedback animations while a result is displayed
pub const FEEDBACK_TICK: Duration = Duration::from_millis(33);

/// Minimum interval between decode attempts on the live frame stream
pub const DECODE_SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

/// Frames are downscaled to at most this dimension before decoding
pub const DECODE_MAX_DIMENSION: u32 = 640;

/// Preferred capture resolution requested from the camera
pub const CAPTURE_WIDTH: u32 = 640;
pub const CAPTURE_HEIGHT: u32 = 480;

/// Default cap on persisted scan log entries
pub const DEFAULT_LOG_LIMIT: u32 = 100;

/// Application info helpers
pub mod app_info {
    /// Application version string (from git describe, or the crate version)
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Whether the app is running inside a flatpak sandbox
    pub fn is_flatpak() -> bool {
        std::path::Path::new("/.flatpak-info").exists()
    }
}

/// UI layout constants
pub mod ui {
    /// Side length of the square capture viewport on the scanner page
    pub const CAPTURE_VIEWPORT_SIZE: f32 = 280.0;

    /// Height of the pulsing scan-line indicator
    pub const SCAN_LINE_HEIGHT: f32 = 3.0;

    /// Corner radius of the capture viewport
    pub const VIEWPORT_RADIUS: f32 = 16.0;

    /// Maximum payload characters shown in a log row before truncation
    pub const LOG_PAYLOAD_PREVIEW: usize = 64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_tick_is_faster_than_animations() {
        assert!(FEEDBACK_TICK < POPUP_REVEAL_DURATION);
        assert!(FEEDBACK_TICK < SCAN_PULSE_PERIOD);
    }

    #[test]
    fn default_log_limit_is_positive() {
        assert!(DEFAULT_LOG_LIMIT > 0);
    }
}
