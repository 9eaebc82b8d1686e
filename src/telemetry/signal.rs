//! Downlink signal strength widget

use crate::config::{Labels, WidgetConfig};
use crate::lifecycle::PollingWidget;
use crate::session::SessionResolver;
use async_trait::async_trait;
use flightdeck_shared::FlightState;
use std::time::Duration;
use tokio::sync::RwLock;

/// Shows the downlink signal quality as a percentage
pub struct DownlinkSignalWidget {
    resolver: SessionResolver,
    interval: Duration,
    labels: Labels,
    text: RwLock<String>,
}

impl DownlinkSignalWidget {
    pub fn new(resolver: SessionResolver, config: &WidgetConfig) -> Self {
        Self {
            resolver,
            interval: config.poll_interval,
            labels: config.labels.clone(),
            text: RwLock::new(config.labels.disconnected.clone()),
        }
    }

    /// Render a snapshot; a missing signal reads as 0%
    pub fn render(state: Option<&FlightState>, labels: &Labels) -> String {
        match state {
            Some(state) => format!("{}%", state.downlink_signal_percent.unwrap_or(0)),
            None => labels.disconnected.clone(),
        }
    }

    /// Last rendered text
    pub async fn text(&self) -> String {
        self.text.read().await.clone()
    }
}

#[async_trait]
impl PollingWidget for DownlinkSignalWidget {
    fn name(&self) -> &'static str {
        "DownlinkSignal"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn refresh(&self) {
        let state = match self.resolver.session().await {
            Some(session) => session.state_snapshot().await,
            None => None,
        };
        *self.text.write().await = Self::render(state.as_ref(), &self.labels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionManagerRegistry, SimulatedSessionManager};
    use std::sync::Arc;

    #[test]
    fn test_render() {
        let labels = Labels::default();
        let state = FlightState {
            downlink_signal_percent: Some(87),
            ..Default::default()
        };
        assert_eq!(DownlinkSignalWidget::render(Some(&state), &labels), "87%");
        assert_eq!(
            DownlinkSignalWidget::render(Some(&FlightState::default()), &labels),
            "0%"
        );
        assert_eq!(DownlinkSignalWidget::render(None, &labels), "disconnected");
    }

    #[tokio::test]
    async fn test_refresh_follows_session() {
        let registry = Arc::new(SessionManagerRegistry::new());
        let manager = Arc::new(SimulatedSessionManager::new("drone"));
        registry.register(manager.clone()).await;
        let widget =
            DownlinkSignalWidget::new(SessionResolver::new(registry), &WidgetConfig::default());

        widget.refresh().await;
        assert_eq!(widget.text().await, "disconnected");

        let session = manager.connect().await;
        widget.refresh().await;
        assert_eq!(widget.text().await, "disconnected");

        session
            .set_state(Some(FlightState {
                downlink_signal_percent: Some(42),
                ..Default::default()
            }))
            .await;
        widget.refresh().await;
        assert_eq!(widget.text().await, "42%");
        assert!(session.submitted().await.is_empty());
    }
}
