// SPDX-License-Identifier: GPL-3.0-only

//! QR decoding on grayscale frames
//!
//! Thin wrapper around the `rqrr` crate. Frames are downscaled before
//! detection to keep per-frame cost bounded; detected grid corners are
//! normalized back to the original frame dimensions.

use super::{CaptureConfig, DecodeEvent, FrameRegion, Symbology};
use crate::constants::DECODE_MAX_DIMENSION;
use image::GrayImage;
use image::imageops::FilterType;
use std::path::Path;
use tracing::{debug, trace};

/// Decode all accepted codes in a grayscale frame
///
/// Returns one event per successfully decoded code. Detection failures on
/// individual grids are logged and skipped; a frame with no codes simply
/// yields an empty vector.
pub fn decode_frame(frame: GrayImage, config: &CaptureConfig) -> Vec<DecodeEvent> {
    // QR is the only family the decoder backend supports; an empty or
    // non-QR filter disables decoding entirely.
    if !config.symbologies.contains(&Symbology::Qr) {
        return Vec::new();
    }

    let (full_width, full_height) = frame.dimensions();
    if full_width == 0 || full_height == 0 {
        return Vec::new();
    }

    // Downscale large frames for detection speed; region coordinates are
    // normalized so the scale factor cancels out.
    let (scaled_width, scaled_height) = decode_dimensions(full_width, full_height);
    let frame = if (scaled_width, scaled_height) != (full_width, full_height) {
        image::imageops::resize(&frame, scaled_width, scaled_height, FilterType::Triangle)
    } else {
        frame
    };

    let (proc_width, proc_height) = frame.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare(frame);
    let grids = prepared.detect_grids();
    trace!(count = grids.len(), "Detected QR grids");

    let mut events = Vec::with_capacity(grids.len());
    for grid in grids {
        let bounds = region_from_corners(&grid.bounds, proc_width, proc_height);
        match grid.decode() {
            Ok((_meta, content)) => {
                debug!(payload = %content, "Decoded QR code");
                events.push(DecodeEvent {
                    payload: content,
                    symbology: Symbology::Qr,
                    bounds: Some(bounds),
                });
            }
            Err(e) => {
                debug!(error = %e, "Failed to decode QR grid");
            }
        }
    }

    events
}

/// Decode QR codes from an image file (used by the `decode` CLI subcommand)
pub fn decode_image_file(path: &Path) -> Result<Vec<DecodeEvent>, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?
        .to_luma8();

    Ok(decode_frame(img, &CaptureConfig::default()))
}

/// Dimensions the frame is decoded at
///
/// A single uniform scale factor brings the larger side down to
/// `DECODE_MAX_DIMENSION`. Scaling the axes independently would distort the
/// square finder patterns the detector keys on.
fn decode_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width <= DECODE_MAX_DIMENSION && height <= DECODE_MAX_DIMENSION {
        return (width, height);
    }

    let scale = (width as f32 / DECODE_MAX_DIMENSION as f32)
        .max(height as f32 / DECODE_MAX_DIMENSION as f32);

    (
        ((width as f32 / scale).round() as u32).max(1),
        ((height as f32 / scale).round() as u32).max(1),
    )
}

/// Compute a normalized bounding box from the four grid corner points
fn region_from_corners(corners: &[rqrr::Point; 4], width: u32, height: u32) -> FrameRegion {
    let xs = corners.iter().map(|p| p.x as f32);
    let ys = corners.iter().map(|p| p.y as f32);

    let min_x = xs.clone().fold(f32::INFINITY, f32::min).max(0.0);
    let max_x = xs.fold(f32::NEG_INFINITY, f32::max).min(width as f32);
    let min_y = ys.clone().fold(f32::INFINITY, f32::min).max(0.0);
    let max_y = ys.fold(f32::NEG_INFINITY, f32::max).min(height as f32);

    FrameRegion::from_pixels(
        min_x as u32,
        min_y as u32,
        (max_x - min_x).max(0.0) as u32,
        (max_y - min_y).max(0.0) as u32,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_from_corners_covers_extremes() {
        let corners = [
            rqrr::Point { x: 10, y: 20 },
            rqrr::Point { x: 110, y: 20 },
            rqrr::Point { x: 110, y: 120 },
            rqrr::Point { x: 10, y: 120 },
        ];

        let region = region_from_corners(&corners, 200, 200);
        assert!((region.x - 0.05).abs() < 0.001);
        assert!((region.y - 0.1).abs() < 0.001);
        assert!((region.width - 0.5).abs() < 0.001);
        assert!((region.height - 0.5).abs() < 0.001);
    }

    #[test]
    fn small_frames_are_not_resized() {
        assert_eq!(decode_dimensions(640, 480), (640, 480));
        assert_eq!(decode_dimensions(320, 240), (320, 240));
    }

    #[test]
    fn downscale_preserves_aspect_ratio() {
        // 1920x1080 must come down uniformly, not be squeezed square.
        assert_eq!(decode_dimensions(1920, 1080), (640, 360));
        assert_eq!(decode_dimensions(1080, 1920), (360, 640));
        assert_eq!(decode_dimensions(1280, 720), (640, 360));
    }

    #[test]
    fn extreme_aspect_ratio_never_hits_zero() {
        let (w, h) = decode_dimensions(10_000, 4);
        assert_eq!(w, 640);
        assert!(h >= 1);
    }

    #[test]
    fn blank_frame_yields_no_events() {
        let frame = GrayImage::from_pixel(64, 64, image::Luma([255u8]));
        let events = decode_frame(frame, &CaptureConfig::default());
        assert!(events.is_empty());
    }

    #[test]
    fn empty_symbology_filter_disables_decoding() {
        let frame = GrayImage::from_pixel(64, 64, image::Luma([255u8]));
        let config = CaptureConfig {
            symbologies: Vec::new(),
            ..CaptureConfig::default()
        };
        assert!(decode_frame(frame, &config).is_empty());
    }
}
