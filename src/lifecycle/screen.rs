//! A group of widgets shown and hidden together

use super::widget::VisibilityControl;
use futures::future::join_all;
use std::sync::Arc;
use tracing::info;

/// Forwards visibility events to every widget it contains
pub struct Screen {
    name: String,
    widgets: Vec<Arc<dyn VisibilityControl>>,
}

impl Screen {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            widgets: Vec::new(),
        }
    }

    /// Add a widget to the screen
    pub fn add(&mut self, widget: Arc<dyn VisibilityControl>) {
        self.widgets.push(widget);
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Show every widget
    pub async fn show(&self) {
        info!("Showing {} ({} widgets)", self.name, self.widgets.len());
        join_all(self.widgets.iter().map(|w| w.appear())).await;
    }

    /// Hide every widget
    pub async fn hide(&self) {
        info!("Hiding {}", self.name);
        join_all(self.widgets.iter().map(|w| w.disappear())).await;
    }

    /// Forward a layout change to every widget
    pub async fn invalidate_layout(&self) {
        join_all(self.widgets.iter().map(|w| w.invalidate_layout())).await;
    }
}
