//! Single-flight-per-key request guard.
//!
//! The guard never queues or merges work. It lets a caller skip a request whose
//! key is already in flight and tell, when a response arrives, whether that
//! response still belongs to the most recently started request.

use crate::lock;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct RequestKeyGuard {
    in_flight: Mutex<Option<String>>,
}

impl RequestKeyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` only when `key` is already in flight. Otherwise `key`
    /// becomes the tracked in-flight key, replacing any other key.
    pub fn should_start(&self, key: &str) -> bool {
        let mut in_flight = lock(&self.in_flight);
        if in_flight.as_deref() == Some(key) {
            return false;
        }
        *in_flight = Some(key.to_string());
        true
    }

    pub fn is_latest(&self, key: &str) -> bool {
        lock(&self.in_flight).as_deref() == Some(key)
    }

    /// Clears the marker if it still belongs to `key`.
    pub fn finish(&self, key: &str) {
        let mut in_flight = lock(&self.in_flight);
        if in_flight.as_deref() == Some(key) {
            *in_flight = None;
        }
    }

    pub fn in_flight(&self) -> Option<String> {
        lock(&self.in_flight).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_is_skipped_until_finished() {
        let guard = RequestKeyGuard::new();
        assert!(guard.should_start("k"));
        assert!(!guard.should_start("k"));
        guard.finish("k");
        assert!(guard.should_start("k"));
    }

    #[test]
    fn test_different_key_always_starts() {
        let guard = RequestKeyGuard::new();
        assert!(guard.should_start("a"));
        assert!(guard.should_start("b"));
        assert!(!guard.is_latest("a"));
        assert!(guard.is_latest("b"));
    }

    #[test]
    fn test_old_finish_does_not_clobber_newer_key() {
        let guard = RequestKeyGuard::new();
        assert!(guard.should_start("old"));
        assert!(guard.should_start("new"));
        guard.finish("old");
        assert_eq!(guard.in_flight().as_deref(), Some("new"));
        guard.finish("new");
        assert!(guard.in_flight().is_none());
        assert!(!guard.is_latest("new"));
    }
}
