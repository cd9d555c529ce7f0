// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the scanner application

use std::fmt;

/// Permission-gate errors
#[derive(Debug, Clone)]
pub enum PermissionError {
    /// Session D-Bus connection unavailable
    BusUnavailable(String),
    /// The camera portal did not answer the request
    PortalFailed(String),
    /// The consent dialog was dismissed without a decision
    RequestCancelled,
}

/// Capture surface errors
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// No camera device matches the requested facing direction
    NoDevice,
    /// Opening or configuring the device failed
    DeviceFailed(String),
    /// The device produced frames in a pixel format we cannot read
    UnsupportedFormat(String),
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::BusUnavailable(msg) => write!(f, "D-Bus unavailable: {}", msg),
            PermissionError::PortalFailed(msg) => write!(f, "Camera portal failed: {}", msg),
            PermissionError::RequestCancelled => write!(f, "Permission request cancelled"),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NoDevice => write!(f, "No camera device found"),
            CaptureError::DeviceFailed(msg) => write!(f, "Camera device failed: {}", msg),
            CaptureError::UnsupportedFormat(fourcc) => {
                write!(f, "Unsupported pixel format: {}", fourcc)
            }
        }
    }
}

impl std::error::Error for PermissionError {}
impl std::error::Error for CaptureError {}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::DeviceFailed(err.to_string())
    }
}
