//! Registry of every session manager known to the process

use super::traits::SessionManager;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Ordered collection of session managers.
///
/// Registration only appends, so the order observed by widgets is stable for
/// the lifetime of the registry.
pub struct SessionManagerRegistry {
    managers: RwLock<Vec<Arc<dyn SessionManager>>>,
}

impl SessionManagerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            managers: RwLock::new(Vec::new()),
        }
    }

    /// Append a session manager
    pub async fn register(&self, manager: Arc<dyn SessionManager>) {
        let mut managers = self.managers.write().await;
        if managers.iter().any(|m| Arc::ptr_eq(m, &manager)) {
            return;
        }
        managers.push(manager);
    }

    /// All managers in registration order
    pub async fn all(&self) -> Vec<Arc<dyn SessionManager>> {
        self.managers.read().await.clone()
    }

    /// Get the number of registered managers
    pub async fn count(&self) -> usize {
        self.managers.read().await.len()
    }
}

impl Default for SessionManagerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
