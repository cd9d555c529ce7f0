// SPDX-License-Identifier: GPL-3.0-only

//! Capture surface boundary
//!
//! The camera and the barcode decoder are external collaborators. This module
//! defines the declarative configuration handed to them (facing direction and
//! accepted code family) and the decode events they produce. The decode-event
//! stream itself is wired and unwired by the application's subscription logic
//! according to session state; nothing in here deduplicates events.

mod decoder;
mod surface;

pub use decoder::{decode_frame, decode_image_file};
pub use surface::capture_events;

use serde::{Deserialize, Serialize};

/// Camera facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Rear-facing camera (first video device)
    #[default]
    Back,
    /// Front-facing camera (second video device, or one named as such)
    Front,
}

impl Facing {
    /// The other facing direction
    pub fn toggled(self) -> Self {
        match self {
            Facing::Back => Facing::Front,
            Facing::Front => Facing::Back,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Facing::Back => "Back",
            Facing::Front => "Front",
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Code family accepted by the capture surface
///
/// The decoder only reports families listed in the capture configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbology {
    Qr,
}

impl Symbology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbology::Qr => "qr",
        }
    }

    /// Human-readable name for UI display
    pub fn display_name(&self) -> &'static str {
        match self {
            Symbology::Qr => "QR Code",
        }
    }
}

impl std::fmt::Display for Symbology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rectangular region within a frame
///
/// Coordinates are normalized (0.0 to 1.0) relative to the frame dimensions,
/// so they can be mapped to screen coordinates regardless of display scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRegion {
    /// Left edge (0.0 = left of frame, 1.0 = right of frame)
    pub x: f32,
    /// Top edge (0.0 = top of frame, 1.0 = bottom of frame)
    pub y: f32,
    /// Width as fraction of frame width
    pub width: f32,
    /// Height as fraction of frame height
    pub height: f32,
}

impl FrameRegion {
    /// Create a frame region from pixel coordinates
    pub fn from_pixels(
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        Self {
            x: x as f32 / frame_width as f32,
            y: y as f32 / frame_height as f32,
            width: width as f32 / frame_width as f32,
            height: height as f32 / frame_height as f32,
        }
    }
}

/// A single decoded code reported by the capture surface
///
/// Payload content is passed through verbatim; validating it is the concern
/// of whatever consumes the scan downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeEvent {
    /// Raw decoded payload
    pub payload: String,
    /// Code family that produced the payload
    pub symbology: Symbology,
    /// Bounding box in normalized frame coordinates, when geometry is known
    pub bounds: Option<FrameRegion>,
}

/// Declarative capture surface configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Which camera to stream from
    pub facing: Facing,
    /// Code families the decoder is allowed to report
    pub symbologies: Vec<Symbology>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            facing: Facing::default(),
            symbologies: vec![Symbology::Qr],
        }
    }
}

/// Events emitted by the capture surface stream
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// The camera device was opened and is streaming
    Opened { width: u32, height: u32 },
    /// A code was decoded from the live stream
    Decoded(DecodeEvent),
    /// The camera could not be opened or streamed; the surface will retry
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_toggles_between_directions() {
        assert_eq!(Facing::Back.toggled(), Facing::Front);
        assert_eq!(Facing::Front.toggled(), Facing::Back);
    }

    #[test]
    fn default_config_is_back_facing_qr_only() {
        let config = CaptureConfig::default();
        assert_eq!(config.facing, Facing::Back);
        assert_eq!(config.symbologies, vec![Symbology::Qr]);
    }

    #[test]
    fn frame_region_from_pixels() {
        let region = FrameRegion::from_pixels(100, 50, 200, 100, 1000, 500);
        assert!((region.x - 0.1).abs() < 0.001);
        assert!((region.y - 0.1).abs() < 0.001);
        assert!((region.width - 0.2).abs() < 0.001);
        assert!((region.height - 0.2).abs() < 0.001);
    }
}
