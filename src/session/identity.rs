//! # Runtime identity tokens and the current-instance tracker.
//!
//! A [`RuntimeIdentity`] is issued once per runtime instance from a process-wide
//! counter. It is compared for equality only; two instances never share a token,
//! whatever their configuration.
//!
//! [`IdentityTracker`] holds at most one "current" identity. Runtime signals carry
//! the identity of the instance that raised them; the controller acts only when
//! [`IdentityTracker::is_current`] confirms it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

/// Opaque token identifying one embedded runtime instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuntimeIdentity(u64);

impl RuntimeIdentity {
    /// Issues a fresh identity, distinct from every identity issued before it.
    pub fn next() -> Self {
        Self(NEXT_IDENTITY.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

impl fmt::Display for RuntimeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "runtime#{}", self.0)
    }
}

/// Single-slot tracker of the session's current runtime identity.
#[derive(Debug, Default)]
pub struct IdentityTracker {
    current: Option<RuntimeIdentity>,
}

impl IdentityTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current identity. The previous one (if any) stops being current
    /// in the same step.
    pub fn set_current(&mut self, id: RuntimeIdentity) -> Option<RuntimeIdentity> {
        self.current.replace(id)
    }

    /// True if `candidate` is the current identity.
    pub fn is_current(&self, candidate: RuntimeIdentity) -> bool {
        self.current == Some(candidate)
    }

    /// Returns the current identity.
    pub fn current(&self) -> Option<RuntimeIdentity> {
        self.current
    }

    /// Forgets the current identity; every later signal is treated as stale.
    pub fn clear(&mut self) -> Option<RuntimeIdentity> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_identities_never_collide() {
        let a = RuntimeIdentity::next();
        let b = RuntimeIdentity::next();
        assert_ne!(a, b);
        assert_eq!(a, a);
    }

    #[test]
    fn empty_tracker_rejects_everything() {
        let tracker = IdentityTracker::new();
        assert!(!tracker.is_current(RuntimeIdentity::next()));
        assert_eq!(tracker.current(), None);
    }

    #[test]
    fn replacement_makes_previous_identity_stale() {
        let mut tracker = IdentityTracker::new();
        let old = RuntimeIdentity::next();
        let new = RuntimeIdentity::next();

        assert_eq!(tracker.set_current(old), None);
        assert!(tracker.is_current(old));

        assert_eq!(tracker.set_current(new), Some(old));
        assert!(tracker.is_current(new));
        assert!(!tracker.is_current(old));
    }

    #[test]
    fn clear_forgets_current() {
        let mut tracker = IdentityTracker::new();
        let id = RuntimeIdentity::next();
        tracker.set_current(id);

        assert_eq!(tracker.clear(), Some(id));
        assert!(!tracker.is_current(id));
        assert_eq!(tracker.clear(), None);
    }
}
