//! Session binding for widgets
//!
//! This module handles:
//! - The service traits a drone session subsystem implements
//! - The process-wide registry of session managers
//! - Resolving which manager a widget observes
//! - An in-memory simulated session for demos and tests

mod registry;
mod resolver;
mod simulated;
mod traits;

pub use registry::SessionManagerRegistry;
pub use resolver::SessionResolver;
pub use simulated::{SimulatedSession, SimulatedSessionManager};
pub use traits::{Session, SessionManager};
