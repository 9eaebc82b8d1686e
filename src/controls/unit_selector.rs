//! Metric/imperial unit system selector

use super::segmented::SegmentedControl;
use crate::config::UnitSettings;
use flightdeck_shared::UnitSystem;
use std::sync::Arc;

static UNIT_SYSTEMS: [UnitSystem; 2] = [UnitSystem::Metric, UnitSystem::Imperial];

/// Two-segment control writing the process-wide unit system.
///
/// Unit changes are local display configuration; nothing is sent to a session.
pub struct UnitSystemSelector {
    settings: Arc<UnitSettings>,
    control: SegmentedControl<UnitSystem>,
}

impl UnitSystemSelector {
    pub fn new(settings: Arc<UnitSettings>) -> Self {
        Self {
            settings,
            control: SegmentedControl::new(&UNIT_SYSTEMS),
        }
    }

    /// Highlight the segment matching the current settings
    pub async fn sync(&self) {
        self.control.show_value(self.settings.get().await).await;
    }

    pub async fn selected(&self) -> Option<UnitSystem> {
        self.control.selected().await
    }

    /// Handle a selection change
    pub async fn select(&self, index: usize) -> Option<UnitSystem> {
        let units = self.control.select(index).await?;
        self.settings.set(units).await;
        Some(units)
    }
}
