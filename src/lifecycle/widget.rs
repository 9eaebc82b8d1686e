//! Polling widget trait abstraction

use async_trait::async_trait;
use flightdeck_shared::widgets;
use std::time::Duration;

/// A widget that redraws itself from session state on a fixed interval
#[async_trait]
pub trait PollingWidget: Send + Sync + 'static {
    /// Human-readable name for logs
    fn name(&self) -> &'static str;

    /// Time between two timer-driven refreshes
    fn interval(&self) -> Duration {
        Duration::from_millis(widgets::DEFAULT_POLL_INTERVAL_MS)
    }

    /// Read session state and update the display.
    ///
    /// Must not assume a session exists and must not write to the session.
    async fn refresh(&self);
}

/// Visibility events a container forwards to a widget
#[async_trait]
pub trait VisibilityControl: Send + Sync {
    fn name(&self) -> &'static str;

    /// Widget became visible
    async fn appear(&self);

    /// Widget was hidden
    async fn disappear(&self);

    /// Container size or constraints changed
    async fn invalidate_layout(&self);
}
