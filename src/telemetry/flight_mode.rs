//! Flight mode label

use crate::config::{Labels, WidgetConfig};
use crate::lifecycle::PollingWidget;
use crate::session::SessionResolver;
use async_trait::async_trait;
use flightdeck_shared::FlightState;
use std::time::Duration;
use tokio::sync::RwLock;

pub struct FlightModeWidget {
    resolver: SessionResolver,
    interval: Duration,
    labels: Labels,
    text: RwLock<String>,
}

impl FlightModeWidget {
    pub fn new(resolver: SessionResolver, config: &WidgetConfig) -> Self {
        Self {
            resolver,
            interval: config.flight_mode_interval,
            labels: config.labels.clone(),
            text: RwLock::new(config.labels.disconnected.clone()),
        }
    }

    pub fn render(state: Option<&FlightState>, labels: &Labels) -> String {
        match state {
            Some(state) => state
                .flight_mode
                .as_deref()
                .filter(|mode| !mode.is_empty())
                .unwrap_or(labels.not_available.as_str())
                .to_string(),
            None => labels.disconnected.clone(),
        }
    }

    pub async fn text(&self) -> String {
        self.text.read().await.clone()
    }
}

#[async_trait]
impl PollingWidget for FlightModeWidget {
    fn name(&self) -> &'static str {
        "FlightMode"
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
