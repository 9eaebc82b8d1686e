//! Widget Visibility State Machine
//!
//! Defines how a polling widget reacts to visibility, layout and timer
//! events. The machine is pure: it decides what to do, the caller owns the
//! timer and performs the refresh.

/// Visibility state of a polling widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Not on screen, no timer alive
    #[default]
    Hidden,
    /// On screen, exactly one repeating timer alive
    VisiblePolling,
}

/// Events that drive the widget lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Widget became visible
    Appeared,
    /// Widget was hidden
    Disappeared,
    /// Container size or constraints changed
    LayoutInvalidated,
    /// The repeating timer fired
    TimerFired,
}

/// What the caller must do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Refresh once now, then arm the repeating timer
    RefreshAndStartTimer,
    /// Cancel and release the timer
    CancelTimer,
    /// Refresh once, leave the timer untouched
    Refresh,
    /// Nothing to do
    Ignore,
}

/// The visibility state machine for one widget instance
#[derive(Debug, Default)]
pub struct VisibilityStateMachine {
    current: Visibility,
}

impl VisibilityStateMachine {
    /// Create a new state machine in Hidden state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current visibility
    pub fn state(&self) -> Visibility {
        self.current
    }

    pub fn is_visible(&self) -> bool {
        self.current == Visibility::VisiblePolling
    }

    /// Process an event and return the action the caller must perform
    pub fn process_event(&mut self, event: LifecycleEvent) -> LifecycleAction {
        use LifecycleEvent::*;
        use Visibility::*;

        match (self.current, event) {
            (Hidden, Appeared) => {
                self.current = VisiblePolling;
                LifecycleAction::RefreshAndStartTimer
            }
            (VisiblePolling, Disappeared) => {
                self.current = Hidden;
                LifecycleAction::CancelTimer
            }
            (VisiblePolling, LayoutInvalidated) | (VisiblePolling, TimerFired) => {
                LifecycleAction::Refresh
            }

            // Already visible: a second timer must never be armed
            (VisiblePolling, Appeared) => LifecycleAction::Ignore,

            // Hidden: nothing to cancel, nothing to refresh
            (Hidden, Disappeared) | (Hidden, LayoutInvalidated) | (Hidden, TimerFired) => {
                LifecycleAction::Ignore
            }
        }
    }
}
