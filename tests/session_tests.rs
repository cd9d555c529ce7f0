// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the scan session and scan log
//!
//! These walk the user-visible flows end to end: arming, decoding,
//! dismissing, and the log growing newest-first under its cap.

use cosmic_scanner::capture::Symbology;
use cosmic_scanner::history::{ScanHistory, ScanRecord};
use cosmic_scanner::{ScanResult, ScanSession};

fn decode(payload: &str) -> ScanResult {
    ScanResult {
        payload: payload.to_string(),
        symbology: Symbology::Qr,
        bounds: None,
    }
}

#[test]
fn test_happy_path_single_scan() {
    // Armed session accepts exactly one decode and holds it for display.
    let mut session = ScanSession::default();
    assert!(session.is_armed());

    assert!(session.accept(decode("ABC123")));
    assert!(session.is_consumed());
    assert_eq!(session.result().unwrap().payload, "ABC123");
}

#[test]
fn test_rapid_fire_decodes_count_once() {
    // A steady camera can decode the same code dozens of times per second;
    // only the first one counts until the user dismisses the result.
    let mut session = ScanSession::default();
    let mut history = ScanHistory::default();

    for _ in 0..30 {
        if session.accept(decode("ABC123")) {
            history.push(ScanRecord::new("ABC123".into(), Symbology::Qr), 100);
        }
    }

    assert_eq!(history.len(), 1);
    assert!(session.is_consumed());
}

#[test]
fn test_scan_again_restores_scanning() {
    let mut session = ScanSession::default();
    session.accept(decode("first"));

    // Dismissing the result re-arms the session for the next code.
    session.reset();
    assert!(session.is_armed());
    assert!(session.result().is_none());

    assert!(session.accept(decode("second")));
    assert_eq!(session.result().unwrap().payload, "second");
}

#[test]
fn test_different_code_after_reset_is_independent() {
    // The second scan does not inherit anything from the first.
    let mut session = ScanSession::default();
    session.accept(decode("first"));
    session.reset();
    session.accept(decode("second"));

    assert_eq!(session.result().unwrap().payload, "second");
    assert_eq!(session.result().unwrap().symbology, Symbology::Qr);
}

#[test]
fn test_log_grows_newest_first() {
    let mut history = ScanHistory::default();
    history.push(ScanRecord::new("oldest".into(), Symbology::Qr), 100);
    history.push(ScanRecord::new("middle".into(), Symbology::Qr), 100);
    history.push(ScanRecord::new("newest".into(), Symbology::Qr), 100);

    let payloads: Vec<&str> = history
        .records()
        .iter()
        .map(|r| r.payload.as_str())
        .collect();
    assert_eq!(payloads, vec!["newest", "middle", "oldest"]);
}

#[test]
fn test_log_respects_limit() {
    let mut history = ScanHistory::default();
    for i in 0..10 {
        history.push(ScanRecord::new(format!("scan-{i}"), Symbology::Qr), 5);
    }

    assert_eq!(history.len(), 5);
    // The newest entries survive.
    assert_eq!(history.records()[0].payload, "scan-9");
    assert_eq!(history.records()[4].payload, "scan-5");
}

#[test]
fn test_truncate_applies_new_limit() {
    let mut history = ScanHistory::default();
    for i in 0..10 {
        history.push(ScanRecord::new(format!("scan-{i}"), Symbology::Qr), 100);
    }

    history.truncate(3);
    assert_eq!(history.len(), 3);
    assert_eq!(history.records()[0].payload, "scan-9");
}

#[test]
fn test_externally_lowered_limit_caps_log() {
    // A limit change can also arrive from outside (config watch), not just
    // from the settings page; the cap must apply the same way.
    let mut history = ScanHistory::default();
    for i in 0..20 {
        history.push(ScanRecord::new(format!("scan-{i}"), Symbology::Qr), 100);
    }

    let new_limit = 4;
    if history.len() > new_limit as usize {
        history.truncate(new_limit);
    }

    assert_eq!(history.len(), 4);
    assert_eq!(history.records()[0].payload, "scan-19");

    // Later pushes respect the lowered cap.
    history.push(ScanRecord::new("scan-20".into(), Symbology::Qr), new_limit);
    assert_eq!(history.len(), 4);
    assert_eq!(history.records()[0].payload, "scan-20");
}

#[test]
fn test_clear_empties_log() {
    let mut history = ScanHistory::default();
    history.push(ScanRecord::new("something".into(), Symbology::Qr), 100);

    history.clear();
    assert!(history.is_empty());
}

#[test]
fn test_link_detection_in_records() {
    let link = ScanRecord::new("https://example.com/item/42".into(), Symbology::Qr);
    let text = ScanRecord::new("plain inventory tag".into(), Symbology::Qr);

    assert!(link.is_link());
    assert!(!text.is_link());
}
