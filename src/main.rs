use anyhow::Result;
use flightdeck::controls::{CaptureToggle, ModeSelector, UnitSystemSelector};
use flightdeck::lifecycle::{PollingDriver, Screen};
use flightdeck::session::{
    SessionManager, SessionManagerRegistry, SessionResolver, SimulatedSession,
    SimulatedSessionManager,
};
use flightdeck::telemetry::{DebugReadoutWidget, DownlinkSignalWidget, FlightModeWidget};
use flightdeck::{UnitSettings, WidgetConfig};
use flightdeck_shared::{FlightState, UnitSystem};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, sleep};

use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = WidgetConfig {
        poll_interval: Duration::from_millis(500),
        ..Default::default()
    };
    let units = Arc::new(UnitSettings::new(UnitSystem::Metric));

    // Session subsystem: two aircraft, only the second one flying
    let registry = Arc::new(SessionManagerRegistry::new());
    let alpha = Arc::new(SimulatedSessionManager::new("alpha"));
    let bravo = Arc::new(SimulatedSessionManager::new("bravo"));
    registry.register(alpha.clone()).await;
    registry.register(bravo.clone()).await;

    let bravo_session = bravo.connect().await;
    let feed = tokio::spawn(telemetry_feed(bravo_session.clone()));
    info!("Session registry ready: {} managers", registry.count().await);

    // Widgets
    let bravo_dyn: Arc<dyn SessionManager> = bravo.clone();
    let signal = Arc::new(PollingDriver::new(DownlinkSignalWidget::new(
        SessionResolver::new(registry.clone()),
        &config,
    )));
    let flight_mode = Arc::new(PollingDriver::new(FlightModeWidget::new(
        SessionResolver::bound(&bravo_dyn, registry.clone()),
        &config,
    )));
    let readout = Arc::new(PollingDriver::new(DebugReadoutWidget::new(
        SessionResolver::new(registry.clone()),
        units.clone(),
        &config,
    )));
    let capture = Arc::new(PollingDriver::new(CaptureToggle::new(
        SessionResolver::new(registry.clone()),
        &config,
    )));
    let mode_selector = ModeSelector::new(SessionResolver::new(registry.clone()), &config);
    let unit_selector = UnitSystemSelector::new(units.clone());
    unit_selector.sync().await;

    let mut screen = Screen::new("flight");
    screen.add(signal.clone());
    screen.add(flight_mode.clone());
    screen.add(readout.clone());
    screen.add(capture.clone());

    screen.show().await;
    sleep(Duration::from_millis(1200)).await;
    info!("Signal: {}", signal.widget().text().await);
    info!("Flight mode: {}", flight_mode.widget().text().await);

    // User interaction
    let outcome = mode_selector.select(1).await;
    info!("Mode selector -> video: {:?}", outcome);
    let outcome = capture.widget().press().await;
    info!("Capture pressed: {:?}", outcome);
    sleep(Duration::from_millis(600)).await;
    info!("Capture button: {}", capture.widget().text().await);

    unit_selector.select(1).await;
    screen.invalidate_layout().await;
    info!("Debug readout:\n{}", readout.widget().text().await);

    // Aircraft drops out; widgets fall back on their own
    bravo.disconnect().await;
    sleep(Duration::from_millis(600)).await;
    warn!("After disconnect, signal: {}", signal.widget().text().await);
    info!("Capture button: {}", capture.widget().text().await);

    screen.hide().await;
    feed.abort();

    info!("Submitted to bravo: {:?}", bravo_session.submitted().await);
    Ok(())
}

/// Push a fresh telemetry snapshot into the session every 200ms
async fn telemetry_feed(session: Arc<SimulatedSession>) {
    let mut ticker = interval(Duration::from_millis(200));
    let mut tick: u32 = 0;

    loop {
        ticker.tick().await;
        tick = tick.saturating_add(1);
        session.set_state(Some(feed_snapshot(tick))).await;
    }
}

/// Synthetic telemetry for the given feed tick
fn feed_snapshot(tick: u32) -> FlightState {
    let mode = if tick < 10 { "LOITER" } else { "GUIDED" };
    let drain = u8::try_from(tick / 5).unwrap_or(u8::MAX);

    FlightState {
        altitude_m: Some(25.0 + tick as f64 * 0.37),
        ultrasonic_altitude_m: Some(12.34),
        downlink_signal_percent: Some(90u8.saturating_sub((tick % 30) as u8)),
        flight_mode: Some(mode.into()),
        satellites: Some(12),
        battery_percent: Some(100u8.saturating_sub(drain)),
        ground_speed_mps: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_drains_and_stays_empty() {
        assert_eq!(feed_snapshot(1).battery_percent, Some(100));
        assert_eq!(feed_snapshot(50).battery_percent, Some(90));
        assert_eq!(feed_snapshot(499).battery_percent, Some(1));
        assert_eq!(feed_snapshot(1280).battery_percent, Some(0));
        assert_eq!(feed_snapshot(1285).battery_percent, Some(0));
        assert_eq!(feed_snapshot(u32::MAX).battery_percent, Some(0));
    }

    #[test]
    fn test_feed_switches_flight_mode() {
        assert_eq!(feed_snapshot(9).flight_mode.as_deref(), Some("LOITER"));
        assert_eq!(feed_snapshot(10).flight_mode.as_deref(), Some("GUIDED"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_readout_shows_fed_telemetry() {
        let registry = Arc::new(SessionManagerRegistry::new());
        let manager = Arc::new(SimulatedSessionManager::new("bravo"));
        registry.register(manager.clone()).await;
        let feed = tokio::spawn(telemetry_feed(manager.connect().await));

        let readout = PollingDriver::new(DebugReadoutWidget::new(
            SessionResolver::new(registry),
            Arc::new(UnitSettings::default()),
            &WidgetConfig::default(),
        ));
        sleep(Duration::from_millis(50)).await;
        readout.appear().await;

        let text = readout.widget().text().await;
        assert!(text.contains("sonar: 12.3 m"));
        assert!(text.contains("mode: LOITER"));

        manager.disconnect().await;
        sleep(Duration::from_millis(300)).await;
        assert_eq!(readout.widget().text().await, "disconnected");

        readout.disappear().await;
        feed.abort();
    }
}
