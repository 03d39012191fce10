//! Job kind registry.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use kubejobs_protocols::{JobKind, JobKindHandler};

use crate::RegistryError;

/// Handlers keyed by the kind they serve.
///
/// Owned by the composition root and shared by reference. A single
/// reader-writer lock guards the map and is never held across I/O.
pub struct KindRegistry {
    handlers: RwLock<HashMap<JobKind, Arc<dyn JobKindHandler>>>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register `handler` under `kind`.
    ///
    /// Fails if the handler reports a different kind, or if `kind` already
    /// has a handler.
    pub fn register(
        &self,
        kind: JobKind,
        handler: Arc<dyn JobKindHandler>,
    ) -> Result<(), RegistryError> {
        let actual = handler.kind();
        if actual != kind {
            return Err(RegistryError::KindMismatch {
                expected: kind,
                actual,
            });
        }

        let mut handlers = self.handlers.write();
        if handlers.contains_key(&kind) {
            return Err(RegistryError::AlreadyRegistered(kind));
        }
        handlers.insert(kind.clone(), handler);
        drop(handlers);

        info!(kind = %kind, "Registered job kind handler");
        Ok(())
    }

    pub fn lookup(&self, kind: &JobKind) -> Result<Arc<dyn JobKindHandler>, RegistryError> {
        self.handlers
            .read()
            .get(kind)
            .cloned()
            .ok_or_else(|| RegistryError::NotRegistered(kind.clone()))
    }

    /// Remove a handler. Meant for test isolation.
    pub fn unregister(&self, kind: &JobKind) -> Result<(), RegistryError> {
        self.handlers
            .write()
            .remove(kind)
            .map(|_| ())
            .ok_or_else(|| RegistryError::NotRegistered(kind.clone()))
    }

    /// Registered kinds, sorted.
    pub fn list(&self) -> Vec<JobKind> {
        let mut kinds: Vec<JobKind> = self.handlers.read().keys().cloned().collect();
        kinds.sort();
        kinds
    }

    pub fn count(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_registered(&self, kind: &JobKind) -> bool {
        self.handlers.read().contains_key(kind)
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
