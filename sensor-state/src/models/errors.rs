//! Module errors

use std::fmt;

/// Represents the different types of errors that can occur in the sensor-state library.
///
/// Expected runtime conditions (a denied permission, a missing accelerometer, a
/// location result without a fix) are not errors; they surface as
/// `PermissionState::Denied`, `ListenerState::Unavailable` or a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorStateError {
    /// Location updates were requested without the location permission.
    PermissionNotGranted(String),

    /// Invalid or unreadable configuration.
    Config(String),

    /// The service needs a tokio runtime that is not available.
    Runtime(String),
}

impl fmt::Display for SensorStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorStateError::PermissionNotGranted(msg) => write!(f, "permission not granted: {msg}"),
            SensorStateError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            SensorStateError::Runtime(msg) => write!(f, "runtime unavailable: {msg}"),
        }
    }
}

impl std::error::Error for SensorStateError {}
