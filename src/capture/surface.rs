// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 frame pump for the capture surface
//!
//! Streams frames from the camera matching the configured facing direction
//! and runs the decoder at a sampled rate. The pump lives on a blocking
//! thread; events flow back through a bounded channel whose receiver is owned
//! by the app's subscription stream. Dropping the subscription disconnects
//! the channel, which stops the pump.

use super::{CaptureConfig, CaptureEvent, Facing};
use crate::constants::{CAPTURE_HEIGHT, CAPTURE_WIDTH, DECODE_SAMPLE_INTERVAL};
use crate::errors::CaptureError;
use futures::channel::mpsc;
use image::GrayImage;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use v4l::FourCC;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;

/// Delay before retrying after a device failure
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Pump decode events from the camera into `sender` until it disconnects
///
/// Intended to run inside `tokio::task::spawn_blocking`; the async side of
/// the subscription forwards events from the paired receiver.
pub fn capture_events(config: CaptureConfig, mut sender: mpsc::Sender<CaptureEvent>) {
    loop {
        match stream_device(&config, &mut sender) {
            Ok(()) => {
                // Receiver dropped; the subscription was unwired.
                info!("Capture surface unwired, pump exiting");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Capture surface failed");
                if sender.try_send(CaptureEvent::Failed(e.to_string())).is_err() {
                    return;
                }
                std::thread::sleep(RETRY_DELAY);
            }
        }
    }
}

/// Open the device for the configured facing and stream until disconnect
///
/// Returns Ok(()) when the receiver goes away, Err on device trouble.
fn stream_device(
    config: &CaptureConfig,
    sender: &mut mpsc::Sender<CaptureEvent>,
) -> Result<(), CaptureError> {
    let path = select_device(config.facing)?;
    info!(path = %path, facing = %config.facing, "Opening camera device");

    let device = v4l::Device::with_path(&path)?;

    let mut format = device.format()?;
    format.width = CAPTURE_WIDTH;
    format.height = CAPTURE_HEIGHT;
    format.fourcc = FourCC::new(b"YUYV");
    let format = device.set_format(&format)?;

    // The driver may refuse YUYV and keep its own format; only formats we
    // can convert to grayscale are usable.
    let fourcc = format.fourcc;
    if fourcc != FourCC::new(b"YUYV") && fourcc != FourCC::new(b"GREY") {
        return Err(CaptureError::UnsupportedFormat(fourcc.to_string()));
    }

    info!(
        width = format.width,
        height = format.height,
        fourcc = %fourcc,
        "Camera format negotiated"
    );

    if sender
        .try_send(CaptureEvent::Opened {
            width: format.width,
            height: format.height,
        })
        .is_err()
    {
        return Ok(());
    }

    let mut stream = Stream::with_buffers(&device, Type::VideoCapture, 4)?;
    let mut last_decode: Option<Instant> = None;

    loop {
        let (buf, _meta) = stream.next()?;

        // Frequency is uncontrolled upstream; sampling only bounds CPU cost.
        // Duplicate events for the same code still reach the session gate.
        if let Some(last) = last_decode {
            if last.elapsed() < DECODE_SAMPLE_INTERVAL {
                continue;
            }
        }
        last_decode = Some(Instant::now());

        let Some(frame) = luma_frame(buf, &fourcc, format.width, format.height) else {
            debug!("Short or malformed frame buffer, skipping");
            continue;
        };

        for event in super::decode_frame(frame, config) {
            match sender.try_send(CaptureEvent::Decoded(event)) {
                Ok(()) => {}
                Err(e) if e.is_disconnected() => return Ok(()),
                Err(_) => {
                    // Channel full: the UI is behind, drop the event. The
                    // code is still in view and will be decoded again.
                    debug!("Decode event dropped (channel full)");
                }
            }
        }

        if sender.is_closed() {
            return Ok(());
        }
    }
}

/// Extract a grayscale image from a raw V4L2 buffer
fn luma_frame(buf: &[u8], fourcc: &FourCC, width: u32, height: u32) -> Option<GrayImage> {
    let pixels = (width * height) as usize;

    let luma = match &fourcc.repr {
        // YUYV is packed Y0 U Y1 V; luma is every other byte
        b"YUYV" => {
            if buf.len() < pixels * 2 {
                return None;
            }
            buf.iter().step_by(2).copied().take(pixels).collect()
        }
        b"GREY" => {
            if buf.len() < pixels {
                return None;
            }
            buf[..pixels].to_vec()
        }
        _ => return None,
    };

    GrayImage::from_raw(width, height, luma)
}

/// Pick the video device path for a facing direction
///
/// Back maps to the first capture node, Front to a node whose name suggests
/// a front/user-facing camera, falling back to the second node if present.
fn select_device(facing: Facing) -> Result<String, CaptureError> {
    let mut nodes: Vec<_> = v4l::context::enum_devices()
        .into_iter()
        .map(|node| {
            let name = node.name().unwrap_or_default();
            (node.path().to_string_lossy().to_string(), name)
        })
        .collect();
    // Numeric order, so /dev/video2 comes before /dev/video10.
    nodes.sort_by_key(|(path, _)| node_index(path));

    if nodes.is_empty() {
        return Err(CaptureError::NoDevice);
    }

    let path = match facing {
        Facing::Back => nodes[0].0.clone(),
        Facing::Front => nodes
            .iter()
            .find(|(_, name)| {
                let name = name.to_lowercase();
                name.contains("front") || name.contains("user")
            })
            .map(|(path, _)| path.clone())
            .unwrap_or_else(|| nodes.get(1).unwrap_or(&nodes[0]).0.clone()),
    };

    Ok(path)
}

/// Device index from a node path's trailing digits
///
/// Non-numeric paths sort last.
fn node_index(path: &str) -> u32 {
    let digits: Vec<char> = path
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect();

    digits
        .into_iter()
        .rev()
        .collect::<String>()
        .parse()
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ordering_is_numeric() {
        let mut paths = vec!["/dev/video10", "/dev/video2", "/dev/video0"];
        paths.sort_by_key(|path| node_index(path));
        assert_eq!(paths, vec!["/dev/video0", "/dev/video2", "/dev/video10"]);
    }

    #[test]
    fn non_numeric_paths_sort_last() {
        assert_eq!(node_index("/dev/media"), u32::MAX);
        assert_eq!(node_index("/dev/video7"), 7);
    }

    #[test]
    fn yuyv_luma_extraction() {
        // 2x1 frame: Y0=10 U=128 Y1=200 V=128
        let buf = [10u8, 128, 200, 128];
        let frame = luma_frame(&buf, &FourCC::new(b"YUYV"), 2, 1).unwrap();
        assert_eq!(frame.get_pixel(0, 0).0[0], 10);
        assert_eq!(frame.get_pixel(1, 0).0[0], 200);
    }

    #[test]
    fn grey_passthrough() {
        let buf = [1u8, 2, 3, 4];
        let frame = luma_frame(&buf, &FourCC::new(b"GREY"), 2, 2).unwrap();
        assert_eq!(frame.get_pixel(1, 1).0[0], 4);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let buf = [0u8; 3];
        assert!(luma_frame(&buf, &FourCC::new(b"YUYV"), 2, 1).is_none());
    }
}
