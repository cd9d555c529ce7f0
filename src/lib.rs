// SPDX-License-Identifier: GPL-3.0-only

//! COSMIC Scanner - A QR code scanner for the COSMIC desktop environment
//!
//! This library provides the core functionality for the COSMIC Scanner
//! application: camera authorization, live capture with QR decoding, the
//! Armed/Consumed scan session, and the persisted scan log.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Main application logic and UI
//! - [`capture`]: Camera capture surface and QR decoding
//! - [`permission`]: Camera authorization via the XDG desktop portal
//! - [`history`]: Persisted scan log
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```ignore
//! // This is a GUI application, typically run via:
//! // cosmic-scanner
//! ```

pub mod app;
pub mod capture;
pub mod config;
pub mod constants;
pub mod errors;
pub mod history;
pub mod i18n;
pub mod permission;

// Re-export commonly used types
pub use app::{AppModel, Message, Page, ScanResult, ScanSession};
pub use capture::{DecodeEvent, Facing, Symbology};
pub use config::Config;
pub use history::{ScanHistory, ScanRecord};
pub use permission::PermissionStatus;
