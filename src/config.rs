//! Widget configuration and process-wide display settings

use flightdeck_shared::{widgets, UnitSystem};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Fallback and status strings shown by widgets.
///
/// Kept here so an app can substitute localized text.
#[derive(Debug, Clone)]
pub struct Labels {
    /// Shown when no session or no telemetry snapshot is available
    pub disconnected: String,
    /// Shown when a single field is missing
    pub not_available: String,
    pub recording: String,
    pub idle: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            disconnected: "disconnected".into(),
            not_available: "n/a".into(),
            recording: "REC".into(),
            idle: "ready".into(),
        }
    }
}

/// Configuration shared by all widgets
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Refresh interval for widgets that do not override it
    pub poll_interval: Duration,
    /// Refresh interval for the debug readout
    pub debug_interval: Duration,
    /// Refresh interval for the flight mode label
    pub flight_mode_interval: Duration,
    /// Refresh interval for the capture indicator
    pub capture_interval: Duration,
    /// Camera channel targeted by camera controls
    pub camera_channel: u8,
    pub labels: Labels,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(widgets::DEFAULT_POLL_INTERVAL_MS),
            debug_interval: Duration::from_millis(widgets::DEBUG_POLL_INTERVAL_MS),
            flight_mode_interval: Duration::from_millis(widgets::FLIGHT_MODE_POLL_INTERVAL_MS),
            capture_interval: Duration::from_millis(widgets::CAPTURE_POLL_INTERVAL_MS),
            camera_channel: widgets::CAMERA_CHANNEL,
            labels: Labels::default(),
        }
    }
}

/// Process-wide unit system, shared by `Arc` with the components that read
/// or change it
#[derive(Debug, Default)]
pub struct UnitSettings {
    current: RwLock<UnitSystem>,
}

impl UnitSettings {
    pub fn new(initial: UnitSystem) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Get the active unit system
    pub async fn get(&self) -> UnitSystem {
        *self.current.read().await
    }

    /// Set the active unit system
    pub async fn set(&self, units: UnitSystem) {
        let mut current = self.current.write().await;
        if *current != units {
            info!("Unit system changed: {:?} -> {:?}", *current, units);
            *current = units;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals() {
        let config = WidgetConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.debug_interval, Duration::from_millis(250));
        assert_eq!(config.flight_mode_interval, Duration::from_millis(500));
        assert_eq!(config.camera_channel, 0);
        assert_eq!(config.labels.not_available, "n/a");
    }

    #[tokio::test]
    async fn test_unit_settings() {
        let settings = UnitSettings::default();
        assert_eq!(settings.get().await, UnitSystem::Metric);

        settings.set(UnitSystem::Imperial).await;
        assert_eq!(settings.get().await, UnitSystem::Imperial);
    }
}
