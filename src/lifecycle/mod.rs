//! Polling widget lifecycle
//!
//! This module handles:
//! - The trait every polling widget implements
//! - Driving a widget's repeating timer from its visibility
//! - Showing and hiding groups of widgets together

mod driver;
mod screen;
mod widget;

pub use driver::PollingDriver;
pub use screen::Screen;
pub use widget::{PollingWidget, VisibilityControl};
