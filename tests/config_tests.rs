// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use cosmic_scanner::capture::Facing;
use cosmic_scanner::config::{AppTheme, Config};

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(
        config.app_theme,
        AppTheme::System,
        "Theme should follow the desktop by default"
    );
    assert_eq!(
        config.facing,
        Facing::Back,
        "Back camera should be the default"
    );
    assert!(config.log_limit > 0, "Scan log limit must be positive");
}

#[test]
fn test_facing_toggle_round_trip() {
    let facing = Facing::Back;
    assert_eq!(facing.toggled(), Facing::Front);
    assert_eq!(facing.toggled().toggled(), Facing::Back);
}
