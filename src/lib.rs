//! Flightdeck Widgets
//!
//! Drone-control widgets bound to live sessions: polling telemetry readouts
//! and command-emitting controls, plus the lifecycle that starts and stops
//! their polling with visibility.

pub mod config;
pub mod controls;
pub mod lifecycle;
pub mod session;
pub mod telemetry;

pub use config::{Labels, UnitSettings, WidgetConfig};
