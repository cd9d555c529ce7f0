// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for headless scanner operations
//!
//! This module provides command-line functionality for:
//! - Decoding codes from still images
//! - Printing the persisted scan log

use cosmic_scanner::capture::decode_image_file;
use cosmic_scanner::history::ScanHistory;
use std::path::Path;

/// Decode all codes in an image file and print their payloads
pub fn decode_image(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let events = decode_image_file(path)?;

    if events.is_empty() {
        println!("No codes found in {}", path.display());
        return Ok(());
    }

    for event in events {
        println!("[{}] {}", event.symbology, event.payload);
    }
    Ok(())
}

/// Print the persisted scan log, newest first
pub fn print_log() -> Result<(), Box<dyn std::error::Error>> {
    let history = ScanHistory::load();

    if history.is_empty() {
        println!("Scan log is empty.");
        return Ok(());
    }

    for record in history.records() {
        println!(
            "{}  [{}]  {}",
            record.scanned_at.format("%Y-%m-%d %H:%M:%S"),
            record.symbology,
            record.payload
        );
    }
    Ok(())
}
