//! Interactive controls
//!
//! This module handles:
//! - Mapping user interaction to session commands
//! - Submitting each command once to the session resolved at that moment
//! - Discarding submission failures
//! - Unit system selection (local configuration, no session command)

mod capture_toggle;
mod emitter;
mod mode_selector;
mod segmented;
mod unit_selector;

pub use capture_toggle::{CaptureIndicator, CaptureToggle};
pub use emitter::SubmitOutcome;
pub use mode_selector::ModeSelector;
pub use segmented::SegmentedControl;
pub use unit_selector::UnitSystemSelector;
