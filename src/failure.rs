//! Deferred failure collection.
//!
//! A runner that wants to keep going after a fixture error records it here and
//! asserts on the collected failures at the end of the scenario.

use crate::error::FixtureError;
use log::warn;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard};

static GLOBAL: Lazy<FailureLog> = Lazy::new(FailureLog::new);

/// Cloneable, thread-safe list of recorded failures. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct FailureLog {
    entries: Arc<Mutex<Vec<FixtureError>>>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide log.
    pub fn global() -> FailureLog {
        GLOBAL.clone()
    }

    pub fn record(&self, error: impl Into<FixtureError>) {
        let error = error.into();
        warn!("Recorded fixture failure: {}", error);
        self.lock().push(error);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Message of the most recently recorded failure.
    pub fn last(&self) -> Option<String> {
        self.lock().last().map(|e| e.to_string())
    }

    /// Removes and returns every recorded failure, oldest first.
    pub fn drain(&self) -> Vec<FixtureError> {
        std::mem::take(&mut *self.lock())
    }

    // Entries are only pushed or taken whole; a poisoned list is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<FixtureError>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::ResolutionError;

    #[test]
    fn test_record_and_drain() {
        let log = FailureLog::new();
        assert!(log.is_empty());

        log.record(ResolutionError::MissingKey("a".to_string()));
        log.record(ResolutionError::MissingKey("b".to_string()));

        assert_eq!(log.len(), 2);
        assert_eq!(log.last(), Some("Key not found in registry: b".to_string()));

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].to_string(), "Key not found in registry: a");
        assert!(log.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let log = FailureLog::new();
        let other = log.clone();
        other.record(ResolutionError::MissingKey("x".to_string()));
        assert_eq!(log.len(), 1);

        log.clear();
        assert!(other.is_empty());
    }
}
