//! Number formatting shared by telemetry widgets

use flightdeck_shared::UnitSystem;

/// Round to one decimal place; never yields negative zero
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0 + 0.0
}

/// One-decimal text for a value
pub fn decimal(value: f64) -> String {
    format!("{:.1}", round_tenths(value))
}

/// A length given in metres, converted and suffixed for `units`
pub fn length(metres: f64, units: UnitSystem) -> String {
    format!("{} {}", decimal(units.length(metres)), units.length_suffix())
}

/// A speed given in m/s, converted and suffixed for `units`
pub fn speed(mps: f64, units: UnitSystem) -> String {
    format!("{} {}", decimal(units.length(mps)), units.speed_suffix())
}
