// SPDX-License-Identifier: GPL-3.0-only

//! Persisted scan log
//!
//! Backs the Logs page. Records are kept newest-first, capped to the
//! configured limit, and saved as JSON under the XDG data directory.

use crate::capture::Symbology;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// One accepted scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Decoded payload, verbatim
    pub payload: String,
    /// Code family the payload came from
    pub symbology: Symbology,
    /// When the scan was accepted
    pub scanned_at: DateTime<Local>,
}

impl ScanRecord {
    pub fn new(payload: String, symbology: Symbology) -> Self {
        Self {
            payload,
            symbology,
            scanned_at: Local::now(),
        }
    }

    /// Whether the payload looks like something a browser can open
    pub fn is_link(&self) -> bool {
        self.payload.starts_with("http://") || self.payload.starts_with("https://")
    }
}

/// In-memory scan log with JSON persistence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanHistory {
    records: Vec<ScanRecord>,
}

impl ScanHistory {
    /// Records, newest first
    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Prepend a record, dropping the oldest entries beyond `limit`
    pub fn push(&mut self, record: ScanRecord, limit: u32) {
        self.records.insert(0, record);
        self.records.truncate(limit.max(1) as usize);
    }

    /// Drop the oldest entries beyond `limit`
    pub fn truncate(&mut self, limit: u32) {
        self.records.truncate(limit.max(1) as usize);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Load the persisted log, or an empty one if none exists yet
    pub fn load() -> Self {
        let Some(path) = history_path() else {
            return Self::default();
        };

        match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(history) => {
                    debug!(path = %path.display(), "Loaded scan log");
                    history
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Scan log unreadable, starting fresh");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the log to disk
    pub fn save(&self) -> Result<(), String> {
        let path = history_path().ok_or_else(|| "no data directory".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_vec_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(&path, json).map_err(|e| e.to_string())?;
        debug!(path = %path.display(), count = self.records.len(), "Saved scan log");
        Ok(())
    }
}

/// Location of the persisted scan log
fn history_path() -> Option<PathBuf> {
    Some(dirs::data_dir()?.join("cosmic-scanner").join("history.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(payload: &str) -> ScanRecord {
        ScanRecord::new(payload.to_string(), Symbology::Qr)
    }

    #[test]
    fn push_prepends_newest() {
        let mut history = ScanHistory::default();
        history.push(record("first"), 10);
        history.push(record("second"), 10);

        assert_eq!(history.records()[0].payload, "second");
        assert_eq!(history.records()[1].payload, "first");
    }

    #[test]
    fn push_enforces_limit() {
        let mut history = ScanHistory::default();
        for i in 0..5 {
            history.push(record(&format!("payload-{}", i)), 3);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.records()[0].payload, "payload-4");
        assert_eq!(history.records()[2].payload, "payload-2");
    }

    #[test]
    fn zero_limit_keeps_latest_record() {
        let mut history = ScanHistory::default();
        history.push(record("only"), 0);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn json_round_trip() {
        let mut history = ScanHistory::default();
        history.push(record("https://example.com"), 10);

        let json = serde_json::to_string(&history).unwrap();
        let restored: ScanHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, history);
    }

    #[test]
    fn link_detection() {
        assert!(record("https://example.com").is_link());
        assert!(record("http://example.com").is_link());
        assert!(!record("WIFI:S:net;;").is_link());
    }
}
