//! Decides which session manager a widget talks to

use super::registry::SessionManagerRegistry;
use super::traits::{Session, SessionManager};
use std::sync::{Arc, Weak};
use tracing::trace;

/// Resolves the session manager for one widget.
///
/// Policy, evaluated fresh on every call:
/// 1. an explicitly bound manager, whether or not it has a session
/// 2. the first registered manager with a live session
/// 3. the first registered manager, even without a session
/// 4. nothing
///
/// The bound reference does not keep the manager alive. Once the manager is
/// dropped, resolution yields nothing rather than drifting to another drone.
#[derive(Clone)]
pub struct SessionResolver {
    bound: Option<Weak<dyn SessionManager>>,
    registry: Arc<SessionManagerRegistry>,
}

impl SessionResolver {
    /// Resolver that follows whatever the registry offers
    pub fn new(registry: Arc<SessionManagerRegistry>) -> Self {
        Self {
            bound: None,
            registry,
        }
    }

    /// Resolver pinned to one manager
    pub fn bound(manager: &Arc<dyn SessionManager>, registry: Arc<SessionManagerRegistry>) -> Self {
        Self {
            bound: Some(Arc::downgrade(manager)),
            registry,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Resolve the session manager to observe right now
    pub async fn resolve(&self) -> Option<Arc<dyn SessionManager>> {
        if let Some(ref bound) = self.bound {
            return bound.upgrade();
        }

        let managers = self.registry.all().await;

        for manager in &managers {
            if manager.current_session().await.is_some() {
                trace!("Resolved manager with live session: {}", manager.name());
                return Some(manager.clone());
            }
        }

        // No live session anywhere: bind to the first manager so the widget
        // can show a disconnected state
        managers.into_iter().next()
    }

    /// Resolve the manager and return its current session
    pub async fn session(&self) -> Option<Arc<dyn Session>> {
        match self.resolve().await {
            Some(manager) => manager.current_session().await,
            None => None,
        }
    }
}
