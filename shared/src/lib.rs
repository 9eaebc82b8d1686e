//! Flightdeck Shared Types
//!
//! This crate provides the data model shared between drone sessions and the
//! widgets observing them: telemetry snapshots, camera state, commands, and
//! the widget visibility state machine.

pub mod state_machine;

use std::fmt;
use thiserror::Error;

/// Widget timing and channel parameters
pub mod widgets {
    /// Default refresh interval for polling widgets
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

    /// Refresh interval for the dense debug readout
    pub const DEBUG_POLL_INTERVAL_MS: u64 = 250;

    /// Refresh interval for the flight mode label
    pub const FLIGHT_MODE_POLL_INTERVAL_MS: u64 = 500;

    /// Refresh interval for the capture indicator
    pub const CAPTURE_POLL_INTERVAL_MS: u64 = 500;

    /// Camera channel that capture and mode commands target
    pub const CAMERA_CHANNEL: u8 = 0;
}

/// Point-in-time telemetry read from a session.
///
/// Every field may be absent; a fresh snapshot replaces the previous one
/// wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightState {
    /// Barometric/GPS altitude in metres
    pub altitude_m: Option<f64>,
    /// Downward ultrasonic sensor altitude in metres
    pub ultrasonic_altitude_m: Option<f64>,
    /// Downlink signal quality, 0-100
    pub downlink_signal_percent: Option<u8>,
    /// Flight mode label as reported by the autopilot
    pub flight_mode: Option<String>,
    pub satellites: Option<u32>,
    pub battery_percent: Option<u8>,
    pub ground_speed_mps: Option<f64>,
}

/// Camera operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Photo,
    Video,
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraMode::Photo => write!(f, "photo"),
            CameraMode::Video => write!(f, "video"),
        }
    }
}

/// Camera state for one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraState {
    pub is_capturing: Option<bool>,
    pub mode: Option<CameraMode>,
}

/// Result of asking a session for a camera channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraReading {
    /// The session has no such channel
    Unsupported,
    /// The channel exists but nothing has been reported yet
    Pending,
    Ready(CameraState),
}

impl CameraReading {
    /// Whether the camera is known to be capturing.
    ///
    /// Anything short of a reported `true` counts as not capturing.
    pub fn is_capturing(&self) -> bool {
        match self {
            CameraReading::Ready(state) => state.is_capturing.unwrap_or(false),
            CameraReading::Unsupported | CameraReading::Pending => false,
        }
    }
}

/// An intended action submitted to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetCameraMode { channel: u8, mode: CameraMode },
    StartCapture { channel: u8 },
    StopCapture { channel: u8 },
}

impl Command {
    /// Camera channel this command targets
    pub fn channel(&self) -> u8 {
        match *self {
            Command::SetCameraMode { channel, .. }
            | Command::StartCapture { channel }
            | Command::StopCapture { channel } => channel,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetCameraMode { channel, mode } => {
                write!(f, "SET_CAMERA_MODE(ch={}, {})", channel, mode)
            }
            Command::StartCapture { channel } => write!(f, "START_CAPTURE(ch={})", channel),
            Command::StopCapture { channel } => write!(f, "STOP_CAPTURE(ch={})", channel),
        }
    }
}

/// Unit system used to format distances and speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    const FEET_PER_METRE: f64 = 3.280_84;

    /// Convert a length in metres to this unit system
    pub fn length(&self, metres: f64) -> f64 {
        match self {
            UnitSystem::Metric => metres,
            UnitSystem::Imperial => metres * Self::FEET_PER_METRE,
        }
    }

    pub fn length_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "ft",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "ft/s",
        }
    }
}

/// Errors a session can report for a submitted command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session disconnected")]
    Disconnected,

    #[error("Command rejected: {0}")]
    Rejected(String),

    #[error("Camera channel {0} not supported")]
    UnsupportedChannel(u8),

    #[error("Session busy")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_capture_state_is_not_capturing() {
        assert!(!CameraReading::Unsupported.is_capturing());
        assert!(!CameraReading::Pending.is_capturing());
        assert!(!CameraReading::Ready(CameraState::default()).is_capturing());
        assert!(CameraReading::Ready(CameraState {
            is_capturing: Some(true),
            mode: None,
        })
        .is_capturing());
    }

    #[test]
    fn test_command_channel() {
        let cmd = Command::SetCameraMode {
            channel: 2,
            mode: CameraMode::Video,
        };
        assert_eq!(cmd.channel(), 2);
        assert_eq!(Command::StopCapture { channel: 0 }.channel(), 0);
    }

    #[test]
    fn test_imperial_length() {
        let feet = UnitSystem::Imperial.length(10.0);
        assert!((feet - 32.8084).abs() < 1e-9);
        assert_eq!(UnitSystem::Metric.length(10.0), 10.0);
        assert_eq!(UnitSystem::default(), UnitSystem::Metric);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            SessionError::UnsupportedChannel(3).to_string(),
            "Camera channel 3 not supported"
        );
    }
}
