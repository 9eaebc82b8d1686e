//! Photo/video camera mode selector

use super::emitter::{self, SubmitOutcome};
use super::segmented::SegmentedControl;
use crate::config::WidgetConfig;
use crate::session::SessionResolver;
use flightdeck_shared::{CameraMode, Command};

static MODES: [CameraMode; 2] = [CameraMode::Photo, CameraMode::Video];

/// Two-segment control that sets the camera mode on the resolved session.
///
/// Every selection submits, including re-selecting the current segment.
pub struct ModeSelector {
    resolver: SessionResolver,
    channel: u8,
    control: SegmentedControl<CameraMode>,
}

impl ModeSelector {
    pub fn new(resolver: SessionResolver, config: &WidgetConfig) -> Self {
        Self {
            resolver,
            channel: config.camera_channel,
            control: SegmentedControl::new(&MODES),
        }
    }

    pub fn segments(&self) -> &'static [CameraMode] {
        self.control.segments()
    }

    pub async fn selected(&self) -> Option<CameraMode> {
        self.control.selected().await
    }

    /// Handle a selection change
    pub async fn select(&self, index: usize) -> SubmitOutcome {
        let Some(mode) = self.control.select(index).await else {
            return SubmitOutcome::NoCommand;
        };

        let command = Command::SetCameraMode {
            channel: self.channel,
            mode,
        };
        emitter::submit(&self.resolver, "ModeSelector", command).await
    }
}
