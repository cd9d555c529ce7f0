// SPDX-License-Identifier: GPL-3.0-only

//! Camera permission gate
//!
//! Authorization goes through the XDG desktop portal
//! (`org.freedesktop.portal.Camera`) on the session bus, which covers both
//! sandboxed and native installs. Outside portal environments the gate falls
//! back to probing device-node accessibility, since there is no other
//! platform authority to ask.

use crate::errors::PermissionError;
use futures::StreamExt;
use std::collections::HashMap;
use tracing::{info, warn};
use zbus::zvariant::{OwnedValue, Value};

const PORTAL_BUS: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const CAMERA_IFACE: &str = "org.freedesktop.portal.Camera";
const REQUEST_IFACE: &str = "org.freedesktop.portal.Request";

/// Camera authorization status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    /// Not yet determined; the scanner renders a neutral placeholder
    #[default]
    Undetermined,
    /// Access granted; the capture surface may be wired
    Granted,
    /// Access denied; the scanner renders a retry prompt
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Non-interactive status probe
///
/// Never shows a consent dialog. Returns `Granted` when a device node is
/// already readable, `Undetermined` when a portal is present to ask, and
/// `Denied` when neither holds.
pub async fn check() -> PermissionStatus {
    if device_accessible() {
        return PermissionStatus::Granted;
    }

    match portal_camera_present().await {
        Ok(true) => PermissionStatus::Undetermined,
        Ok(false) => {
            info!("Portal reports no camera present");
            PermissionStatus::Denied
        }
        Err(e) => {
            warn!(error = %e, "Camera portal unavailable");
            PermissionStatus::Denied
        }
    }
}

/// Interactive request via the portal consent flow
///
/// May permanently change the platform-level grant. Invoked from the retry
/// affordance as often as the user likes; the portal handles rate limiting.
pub async fn request() -> Result<PermissionStatus, PermissionError> {
    let connection = zbus::Connection::session()
        .await
        .map_err(|e| PermissionError::BusUnavailable(e.to_string()))?;

    let proxy = zbus::Proxy::new(&connection, PORTAL_BUS, PORTAL_PATH, CAMERA_IFACE)
        .await
        .map_err(|e| PermissionError::PortalFailed(e.to_string()))?;

    // The portal replies through a Response signal on a request object whose
    // path is derived from our unique name and a handle token.
    let token = format!("cosmic_scanner_{}", std::process::id());
    let request_path = request_object_path(&connection, &token)?;

    let request_proxy = zbus::Proxy::new(
        &connection,
        PORTAL_BUS,
        request_path.as_str(),
        REQUEST_IFACE,
    )
    .await
    .map_err(|e| PermissionError::PortalFailed(e.to_string()))?;

    // Subscribe before calling AccessCamera so the response cannot race us.
    let mut responses = request_proxy
        .receive_signal("Response")
        .await
        .map_err(|e| PermissionError::PortalFailed(e.to_string()))?;

    let mut options: HashMap<&str, Value> = HashMap::new();
    options.insert("handle_token", Value::new(token.as_str()));

    let _handle: zbus::zvariant::OwnedObjectPath = proxy
        .call("AccessCamera", &(options,))
        .await
        .map_err(|e| PermissionError::PortalFailed(e.to_string()))?;

    let message = responses
        .next()
        .await
        .ok_or(PermissionError::RequestCancelled)?;

    let (code, _results): (u32, HashMap<String, OwnedValue>) = message
        .body()
        .deserialize()
        .map_err(|e| PermissionError::PortalFailed(e.to_string()))?;

    // Response codes: 0 = success, 1 = user cancelled, 2 = other failure
    let status = match code {
        0 => {
            info!("Camera access granted by portal");
            PermissionStatus::Granted
        }
        1 => {
            info!("Camera access request cancelled by user");
            PermissionStatus::Denied
        }
        other => {
            warn!(code = other, "Camera access request failed");
            PermissionStatus::Denied
        }
    };

    Ok(status)
}

/// Whether any video device node is already readable without a portal
fn device_accessible() -> bool {
    let Ok(entries) = std::fs::read_dir("/dev") else {
        return false;
    };

    entries.flatten().any(|entry| {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        name.starts_with("video") && std::fs::File::open(entry.path()).is_ok()
    })
}

/// Query the portal's IsCameraPresent property
async fn portal_camera_present() -> Result<bool, PermissionError> {
    let connection = zbus::Connection::session()
        .await
        .map_err(|e| PermissionError::BusUnavailable(e.to_string()))?;

    let proxy = zbus::Proxy::new(&connection, PORTAL_BUS, PORTAL_PATH, CAMERA_IFACE)
        .await
        .map_err(|e| PermissionError::PortalFailed(e.to_string()))?;

    proxy
        .get_property("IsCameraPresent")
        .await
        .map_err(|e| PermissionError::PortalFailed(e.to_string()))
}

/// Compute the request object path the portal will use for our call
fn request_object_path(
    connection: &zbus::Connection,
    token: &str,
) -> Result<String, PermissionError> {
    let unique = connection
        .unique_name()
        .ok_or_else(|| PermissionError::BusUnavailable("no unique bus name".into()))?;

    // ":1.42" becomes "1_42" per the portal spec
    let sender = unique.as_str().trim_start_matches(':').replace('.', "_");

    Ok(format!(
        "/org/freedesktop/portal/desktop/request/{}/{}",
        sender, token
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_undetermined() {
        assert_eq!(PermissionStatus::default(), PermissionStatus::Undetermined);
    }

    #[test]
    fn only_granted_is_granted() {
        assert!(PermissionStatus::Granted.is_granted());
        assert!(!PermissionStatus::Undetermined.is_granted());
        assert!(!PermissionStatus::Denied.is_granted());
    }
}
