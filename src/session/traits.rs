//! Session service traits consumed by widgets

use async_trait::async_trait;
use flightdeck_shared::{CameraReading, Command, FlightState, SessionError};
use std::sync::Arc;

/// The live logical connection to a single drone
#[async_trait]
pub trait Session: Send + Sync {
    /// Latest telemetry snapshot, if any has been received
    async fn state_snapshot(&self) -> Option<FlightState>;

    /// Camera state for the given channel
    async fn camera_state(&self, channel: u8) -> CameraReading;

    /// Submit a command to the drone
    async fn submit(&self, command: Command) -> Result<(), SessionError>;
}

/// Owns at most one session at a time
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// The session currently connected, if any
    async fn current_session(&self) -> Option<Arc<dyn Session>>;

    /// Human-readable name for logs
    fn name(&self) -> &str;
}
