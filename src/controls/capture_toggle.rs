//! Capture start/stop button

use super::emitter::{self, SubmitOutcome};
use crate::config::{Labels, WidgetConfig};
use crate::lifecycle::PollingWidget;
use crate::session::SessionResolver;
use async_trait::async_trait;
use flightdeck_shared::Command;
use std::time::Duration;
use tokio::sync::RwLock;

/// What the button currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureIndicator {
    #[default]
    Disconnected,
    Idle,
    Recording,
}

/// Single button toggling capture on a fixed camera channel.
///
/// An unknown capture state counts as not capturing, so a press on a
/// connected drone always sends a command (start capture when in doubt).
pub struct CaptureToggle {
    resolver: SessionResolver,
    channel: u8,
    interval: Duration,
    labels: Labels,
    indicator: RwLock<CaptureIndicator>,
}

impl CaptureToggle {
    pub fn new(resolver: SessionResolver, config: &WidgetConfig) -> Self {
        Self {
            resolver,
            channel: config.camera_channel,
            interval: config.capture_interval,
            labels: config.labels.clone(),
            indicator: RwLock::new(CaptureIndicator::Disconnected),
        }
    }

    /// Whether the resolved camera is capturing; false whenever unknown
    pub async fn camera_is_capturing(&self) -> bool {
        match self.resolver.session().await {
            Some(session) => session.camera_state(self.channel).await.is_capturing(),
            None => false,
        }
    }

    /// Handle a button press
    pub async fn press(&self) -> SubmitOutcome {
        let Some(session) = self.resolver.session().await else {
            return SubmitOutcome::NoSession;
        };

        let command = if session.camera_state(self.channel).await.is_capturing() {
            Command::StopCapture { channel: self.channel }
        } else {
            Command::StartCapture { channel: self.channel }
        };

        emitter::submit_to(session.as_ref(), "CaptureToggle", command).await
    }

    pub async fn indicator(&self) -> CaptureIndicator {
        *self.indicator.read().await
    }

    /// Label for the current indicator
    pub async fn text(&self) -> String {
        match self.indicator().await {
            CaptureIndicator::Disconnected => self.labels.disconnected.clone(),
            CaptureIndicator::Idle => self.labels.idle.clone(),
            CaptureIndicator::Recording => self.labels.recording.clone(),
        }
    }
}

#[async_trait]
impl PollingWidget for CaptureToggle {
    fn name(&self) -> &'static str {
        "CaptureToggle"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn refresh(&self) {
        let indicator = match self.resolver.session().await {
            Some(session) => {
                if session.camera_state(self.channel).await.is_capturing() {
                    CaptureIndicator::Recording
                } else {
                    CaptureIndicator::Idle
                }
            }
            None => CaptureIndicator::Disconnected,
        };
        *self.indicator.write().await = indicator;
    }
}
