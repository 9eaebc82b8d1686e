//! Dense debug readout
//!
//! Dumps every telemetry field plus the camera capture state, refreshed
//! four times a second. Distances and speeds follow the process-wide unit
//! system.

use super::format;
use crate::config::{Labels, UnitSettings, WidgetConfig};
use crate::lifecycle::PollingWidget;
use crate::session::SessionResolver;
use async_trait::async_trait;
use flightdeck_shared::{CameraReading, FlightState, UnitSystem};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub struct DebugReadoutWidget {
    resolver: SessionResolver,
    units: Arc<UnitSettings>,
    interval: Duration,
    channel: u8,
    labels: Labels,
    text: RwLock<String>,
}

impl DebugReadoutWidget {
    pub fn new(resolver: SessionResolver, units: Arc<UnitSettings>, config: &WidgetConfig) -> Self {
        Self {
            resolver,
            units,
            interval: config.debug_interval,
            channel: config.camera_channel,
            labels: config.labels.clone(),
            text: RwLock::new(config.labels.disconnected.clone()),
        }
    }

    /// Render one line per field; a missing snapshot renders the
    /// disconnected label alone
    pub fn render(
        state: Option<&FlightState>,
        camera: CameraReading,
        units: UnitSystem,
        labels: &Labels,
    ) -> String {
        let Some(state) = state else {
            return labels.disconnected.clone();
        };
        let na = || labels.not_available.clone();

        let lines = [
            format!(
                "alt: {}",
                state.altitude_m.map(|v| format::length(v, units)).unwrap_or_else(na)
            ),
            format!(
                "sonar: {}",
                state
                    .ultrasonic_altitude_m
                    .map(|v| format::length(v, units))
                    .unwrap_or_else(na)
            ),
            format!("signal: {}%", state.downlink_signal_percent.unwrap_or(0)),
            format!("mode: {}", state.flight_mode.clone().unwrap_or_else(na)),
            format!(
                "sats: {}",
                state.satellites.map(|v| v.to_string()).unwrap_or_else(na)
            ),
            format!(
                "battery: {}",
                state.battery_percent.map(|v| format!("{}%", v)).unwrap_or_else(na)
            ),
            format!(
                "speed: {}",
                state.ground_speed_mps.map(|v| format::speed(v, units)).unwrap_or_else(na)
            ),
            format!("rec: {}", camera.is_capturing()),
        ];

        lines.join("\n")
    }

    pub async fn text(&self) -> String {
        self.text.read().await.clone()
    }
}

#[async_trait]
impl PollingWidget for DebugReadoutWidget {
    fn name(&self) -> &'static str {
        "DebugReadout"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn refresh(&self) {
        let (state, camera) = match self.resolver.session().await {
            Some(session) => (
                session.state_snapshot().await,
                session.camera_state(self.channel).await,
            ),
            None => (None, CameraReading::Unsupported),
        };
        let units = self.units.get().await;

        *self.text.write().await = Self::render(state.as_ref(), camera, units, &self.labels);
    }
}
