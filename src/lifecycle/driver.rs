//! Polling driver
//!
//! Owns the repeating timer of one widget and runs the visibility state
//! machine against it: refresh and arm on appear, refresh on every tick and
//! layout change while visible, cancel on disappear.

use super::widget::{PollingWidget, VisibilityControl};
use async_trait::async_trait;
use flightdeck_shared::state_machine::{LifecycleAction, LifecycleEvent, VisibilityStateMachine};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Shortest accepted polling interval
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

struct DriverState {
    fsm: VisibilityStateMachine,
    /// Bumped whenever a timer is armed or cancelled; a tick from an older
    /// generation never refreshes
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl DriverState {
    fn cancel_timer(&mut self) {
        self.generation += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Drives the lifecycle of one polling widget.
///
/// Every refresh (immediate, layout or tick) runs while holding the driver's
/// lock, so refreshes of one widget never overlap and none can start after
/// `disappear()` has returned.
pub struct PollingDriver<W: PollingWidget> {
    widget: Arc<W>,
    inner: Arc<Mutex<DriverState>>,
}

impl<W: PollingWidget> PollingDriver<W> {
    /// Wrap a widget; it starts hidden
    pub fn new(widget: W) -> Self {
        Self::from_arc(Arc::new(widget))
    }

    pub fn from_arc(widget: Arc<W>) -> Self {
        Self {
            widget,
            inner: Arc::new(Mutex::new(DriverState {
                fsm: VisibilityStateMachine::new(),
                generation: 0,
                timer: None,
            })),
        }
    }

    /// The driven widget
    pub fn widget(&self) -> &Arc<W> {
        &self.widget
    }

    pub async fn is_visible(&self) -> bool {
        self.inner.lock().await.fsm.is_visible()
    }

    /// Number of timers currently alive for this widget (0 or 1)
    pub async fn live_timers(&self) -> usize {
        let state = self.inner.lock().await;
        state.timer.iter().filter(|t| !t.is_finished()).count()
    }

    /// Widget became visible: refresh now, then every interval
    pub async fn appear(&self) {
        let mut state = self.inner.lock().await;
        let before = state.fsm.state();

        match state.fsm.process_event(LifecycleEvent::Appeared) {
            LifecycleAction::RefreshAndStartTimer => {
                let period = self.widget.interval().max(MIN_POLL_INTERVAL);
                debug!(
                    "[{}] {:?} -> {:?}, polling every {:?}",
                    self.widget.name(),
                    before,
                    state.fsm.state(),
                    period
                );

                self.widget.refresh().await;

                state.cancel_timer();
                let start = Instant::now() + period;
                state.timer = Some(tokio::spawn(poll_loop(
                    self.widget.clone(),
                    Arc::downgrade(&self.inner),
                    state.generation,
                    start,
                    period,
                )));
            }
            _ => trace!("[{}] Already visible", self.widget.name()),
        }
    }

    /// Widget was hidden: cancel the timer
    pub async fn disappear(&self) {
        let mut state = self.inner.lock().await;
        let before = state.fsm.state();

        match state.fsm.process_event(LifecycleEvent::Disappeared) {
            LifecycleAction::CancelTimer => {
                state.cancel_timer();
                debug!(
                    "[{}] {:?} -> {:?}, polling stopped",
                    self.widget.name(),
                    before,
                    state.fsm.state()
                );
            }
            _ => trace!("[{}] Already hidden", self.widget.name()),
        }
    }

    /// Container layout changed: refresh once if visible
    pub async fn invalidate_layout(&self) {
        let mut state = self.inner.lock().await;

        let action = state.fsm.process_event(LifecycleEvent::LayoutInvalidated);
        if let LifecycleAction::Refresh = action {
            trace!("[{}] Layout refresh", self.widget.name());
            self.widget.refresh().await;
        }
    }
}

impl<W: PollingWidget> Drop for PollingDriver<W> {
    fn drop(&mut self) {
        // A tick holding the lock right now sees the dead Weak on its next
        // wake-up and exits on its own
        if let Ok(mut state) = self.inner.try_lock() {
            state.cancel_timer();
        }
    }
}

#[async_trait]
impl<W: PollingWidget> VisibilityControl for PollingDriver<W> {
    fn name(&self) -> &'static str {
        self.widget.name()
    }

    async fn appear(&self) {
        PollingDriver::appear(self).await
    }

    async fn disappear(&self) {
        PollingDriver::disappear(self).await
    }

    async fn invalidate_layout(&self) {
        PollingDriver::invalidate_layout(self).await
    }
}

/// Timer task: one refresh per tick until cancelled
async fn poll_loop<W: PollingWidget>(
    widget: Arc<W>,
    state: Weak<Mutex<DriverState>>,
    generation: u64,
    start: Instant,
    period: Duration,
) {
    let mut ticker = interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let Some(shared) = state.upgrade() else {
            break;
        };
        let mut guard = shared.lock().await;

        if guard.generation != generation {
            break;
        }

        match guard.fsm.process_event(LifecycleEvent::TimerFired) {
            LifecycleAction::Refresh => {
                trace!("[{}] Tick", widget.name());
                widget.refresh().await;
            }
            _ => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    struct CountingWidget {
        interval: Duration,
        refreshes: AtomicUsize,
    }

    impl CountingWidget {
        fn new(interval: Duration) -> Self {
            Self {
                interval,
                refreshes: AtomicUsize::new(0),
            }
        }

        fn count(&self) -> usize {
            self.refreshes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PollingWidget for CountingWidget {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn interval(&self) -> Duration {
            self.interval
        }

        async fn refresh(&self) {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn driver(interval_ms: u64) -> PollingDriver<CountingWidget> {
        PollingDriver::new(CountingWidget::new(Duration::from_millis(interval_ms)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_appear_refreshes_then_polls() {
        let driver = driver(1000);
        assert_eq!(driver.widget().count(), 0);

        driver.appear().await;
        assert_eq!(driver.widget().count(), 1);

        sleep(Duration::from_millis(950)).await;
        assert_eq!(driver.widget().count(), 1);

        sleep(Duration::from_millis(100)).await;
        assert_eq!(driver.widget().count(), 2);

        sleep(Duration::from_millis(2000)).await;
        assert_eq!(driver.widget().count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disappear_stops_refreshes() {
        let driver = driver(1000);
        driver.appear().await;
        sleep(Duration::from_millis(2050)).await;
        assert_eq!(driver.widget().count(), 3);

        driver.disappear().await;
        sleep(Duration::from_millis(5000)).await;
        assert_eq!(driver.widget().count(), 3);
        assert_eq!(driver.live_timers().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_timers_track_visibility() {
        let driver = driver(250);
        let script = [true, true, false, false, true, false, true, true, false, true];

        for visible in script {
            if visible {
                driver.appear().await;
            } else {
                driver.disappear().await;
            }
            sleep(Duration::from_millis(300)).await;

            let timers = driver.live_timers().await;
            assert!(timers <= 1);
            assert_eq!(timers == 1, visible);
            assert_eq!(driver.is_visible().await, visible);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_appear_keeps_one_cadence() {
        let driver = driver(1000);
        driver.appear().await;
        driver.appear().await;
        assert_eq!(driver.widget().count(), 1);

        sleep(Duration::from_millis(1050)).await;
        assert_eq!(driver.widget().count(), 2);
        assert_eq!(driver.live_timers().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_layout_invalidation_while_hidden_is_ignored() {
        let driver = driver(1000);
        driver.invalidate_layout().await;
        assert_eq!(driver.widget().count(), 0);

        driver.appear().await;
        driver.disappear().await;
        driver.invalidate_layout().await;
        assert_eq!(driver.widget().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_layout_invalidation_keeps_tick_schedule() {
        let driver = driver(1000);
        driver.appear().await;

        sleep(Duration::from_millis(400)).await;
        driver.invalidate_layout().await;
        assert_eq!(driver.widget().count(), 2);

        // Next tick still lands at 1000ms, not 1400ms
        sleep(Duration::from_millis(650)).await;
        assert_eq!(driver.widget().count(), 3);

        sleep(Duration::from_millis(900)).await;
        assert_eq!(driver.widget().count(), 3);

        sleep(Duration::from_millis(100)).await;
        assert_eq!(driver.widget().count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reappear_restarts_cadence() {
        let driver = driver(1000);
        driver.appear().await;
        sleep(Duration::from_millis(600)).await;
        driver.disappear().await;

        driver.appear().await;
        assert_eq!(driver.widget().count(), 2);

        // Old timer would have fired at 1000ms; the new one fires at 1600ms
        sleep(Duration::from_millis(500)).await;
        assert_eq!(driver.widget().count(), 2);

        sleep(Duration::from_millis(550)).await;
        assert_eq!(driver.widget().count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_timer() {
        let driver = driver(100);
        let widget = driver.widget().clone();
        driver.appear().await;
        drop(driver);

        sleep(Duration::from_millis(1000)).await;
        assert_eq!(widget.count(), 1);
        assert_eq!(Arc::strong_count(&widget), 1);
    }
}
