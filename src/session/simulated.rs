//! In-memory drone session
//!
//! Stands in for a real session subsystem: holds the latest telemetry
//! snapshot and per-channel camera state, applies camera commands to that
//! state, and keeps a log of every submission.

use super::traits::{Session, SessionManager};
use async_trait::async_trait;
use flightdeck_shared::{CameraReading, CameraState, Command, FlightState, SessionError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// A session whose state lives entirely in memory
pub struct SimulatedSession {
    /// Latest telemetry snapshot
    state: RwLock<Option<FlightState>>,
    /// One reading per supported camera channel
    cameras: RwLock<Vec<CameraReading>>,
    /// Every command submitted, in order
    submitted: RwLock<Vec<Command>>,
    /// When set, submissions fail with this error
    failure: RwLock<Option<SessionError>>,
}

impl SimulatedSession {
    /// Create a session with the given number of camera channels
    pub fn new(camera_channels: u8) -> Self {
        Self {
            state: RwLock::new(None),
            cameras: RwLock::new(vec![CameraReading::Pending; camera_channels as usize]),
            submitted: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
        }
    }

    /// Replace the telemetry snapshot
    pub async fn set_state(&self, state: Option<FlightState>) {
        *self.state.write().await = state;
    }

    /// Overwrite the reading of one camera channel
    pub async fn set_camera(&self, channel: u8, camera: CameraState) {
        if let Some(reading) = self.cameras.write().await.get_mut(channel as usize) {
            *reading = CameraReading::Ready(camera);
        }
    }

    /// Make every following submission fail (or succeed again with `None`)
    pub async fn fail_submissions(&self, error: Option<SessionError>) {
        *self.failure.write().await = error;
    }

    /// Commands submitted so far
    pub async fn submitted(&self) -> Vec<Command> {
        self.submitted.read().await.clone()
    }

    async fn apply(&self, command: Command) -> Result<(), SessionError> {
        let mut cameras = self.cameras.write().await;
        let reading = cameras
            .get_mut(command.channel() as usize)
            .ok_or(SessionError::UnsupportedChannel(command.channel()))?;

        let mut camera = match *reading {
            CameraReading::Ready(state) => state,
            _ => CameraState::default(),
        };

        match command {
            Command::SetCameraMode { mode, .. } => {
                if camera.is_capturing == Some(true) {
                    return Err(SessionError::Busy);
                }
                camera.mode = Some(mode);
            }
            Command::StartCapture { .. } => camera.is_capturing = Some(true),
            Command::StopCapture { .. } => camera.is_capturing = Some(false),
        }

        *reading = CameraReading::Ready(camera);
        Ok(())
    }
}

impl Default for SimulatedSession {
    fn default() -> Self {
        Self::new(1)
    }
}

#[async_trait]
impl Session for SimulatedSession {
    async fn state_snapshot(&self) -> Option<FlightState> {
        self.state.read().await.clone()
    }

    async fn camera_state(&self, channel: u8) -> CameraReading {
        self.cameras
            .read()
            .await
            .get(channel as usize)
            .copied()
            .unwrap_or(CameraReading::Unsupported)
    }

    async fn submit(&self, command: Command) -> Result<(), SessionError> {
        self.submitted.write().await.push(command);

        if let Some(error) = self.failure.read().await.clone() {
            debug!("[SIM] Failing {}: {}", command, error);
            return Err(error);
        }

        self.apply(command).await?;
        debug!("[SIM] Applied {}", command);
        Ok(())
    }
}

/// A session manager whose session can be connected and dropped at will
pub struct SimulatedSessionManager {
    name: String,
    session: RwLock<Option<Arc<SimulatedSession>>>,
}

impl SimulatedSessionManager {
    /// Create a manager with no session
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            session: RwLock::new(None),
        }
    }

    /// Start a fresh single-camera session, replacing any existing one
    pub async fn connect(&self) -> Arc<SimulatedSession> {
        let session = Arc::new(SimulatedSession::default());
        *self.session.write().await = Some(session.clone());
        info!("[SIM] {} connected", self.name);
        session
    }

    /// Drop the current session
    pub async fn disconnect(&self) {
        if self.session.write().await.take().is_some() {
            info!("[SIM] {} disconnected", self.name);
        }
    }

    /// The concrete current session
    pub async fn session(&self) -> Option<Arc<SimulatedSession>> {
        self.session.read().await.clone()
    }
}

#[async_trait]
impl SessionManager for SimulatedSessionManager {
    async fn current_session(&self) -> Option<Arc<dyn Session>> {
        self.session
            .read()
            .await
            .clone()
            .map(|s| s as Arc<dyn Session>)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightdeck_shared::CameraMode;

    #[tokio::test]
    async fn test_capture_commands_update_camera() {
        let session = SimulatedSession::default();
        assert_eq!(session.camera_state(0).await, CameraReading::Pending);

        session.submit(Command::StartCapture { channel: 0 }).await.unwrap();
        assert!(session.camera_state(0).await.is_capturing());

        session.submit(Command::StopCapture { channel: 0 }).await.unwrap();
        assert!(!session.camera_state(0).await.is_capturing());
        assert_eq!(session.submitted().await.len(), 2);
    }

    #[tokio::test]
    async fn test_unsupported_channel() {
        let session = SimulatedSession::default();
        assert_eq!(session.camera_state(3).await, CameraReading::Unsupported);

        let result = session.submit(Command::StartCapture { channel: 3 }).await;
        assert_eq!(result, Err(SessionError::UnsupportedChannel(3)));
    }

    #[tokio::test]
    async fn test_mode_change_rejected_while_capturing() {
        let session = SimulatedSession::default();
        session
            .set_camera(0, CameraState { is_capturing: Some(true), mode: None })
            .await;

        let result = session
            .submit(Command::SetCameraMode { channel: 0, mode: CameraMode::Photo })
            .await;
        assert_eq!(result, Err(SessionError::Busy));
    }

    #[tokio::test]
    async fn test_forced_failure_still_records() {
        let session = SimulatedSession::default();
        session.fail_submissions(Some(SessionError::Disconnected)).await;

        let result = session.submit(Command::StartCapture { channel: 0 }).await;
        assert_eq!(result, Err(SessionError::Disconnected));
        assert_eq!(session.submitted().await, vec![Command::StartCapture { channel: 0 }]);
        assert_eq!(session.camera_state(0).await, CameraReading::Pending);
    }

    #[tokio::test]
    async fn test_manager_connect_disconnect() {
        let manager = SimulatedSessionManager::new("drone-1");
        assert!(manager.current_session().await.is_none());

        manager.connect().await;
        assert!(manager.current_session().await.is_some());

        manager.disconnect().await;
        assert!(manager.current_session().await.is_none());
        assert_eq!(manager.name(), "drone-1");
    }
}
