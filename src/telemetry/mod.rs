//! Read-only telemetry widgets
//!
//! Each widget polls the resolved session, renders one display string with
//! explicit fallbacks, and never writes back to the session.

mod debug;
mod flight_mode;
pub mod format;
mod signal;

pub use debug::DebugReadoutWidget;
pub use flight_mode::FlightModeWidget;
pub use signal::DownlinkSignalWidget;
