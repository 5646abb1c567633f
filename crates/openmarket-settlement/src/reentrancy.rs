//! Reentrancy lock for mutating entry points.
//!
//! Every settlement, cancellation and configuration change holds the lock
//! for its whole duration. A nested entry while the lock is held fails with
//! [`MarketError::Reentrancy`] instead of observing half-applied state.
//! State mutations also precede collaborator calls.

use openmarket_types::{MarketError, Result};

/// Whether a mutating call is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Idle,
    Entered,
}

/// Single-slot reentrancy lock.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    state: LockState,
}

impl ReentrancyGuard {
    /// Create an idle guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> LockState {
        self.state
    }

    /// Acquire the lock, or fail with [`MarketError::Reentrancy`] if held.
    pub fn enter(&mut self) -> Result<()> {
        if self.state == LockState::Entered {
            return Err(MarketError::Reentrancy);
        }
        self.state = LockState::Entered;
        Ok(())
    }

    /// Release the lock.
    pub fn exit(&mut self) {
        self.state = LockState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let guard = ReentrancyGuard::new();
        assert_eq!(guard.state(), LockState::Idle);
    }

    #[test]
    fn nested_enter_rejected() {
        let mut guard = ReentrancyGuard::new();
        guard.enter().unwrap();
        let err = guard.enter().unwrap_err();
        assert!(matches!(err, MarketError::Reentrancy));
        assert_eq!(guard.state(), LockState::Entered);
    }

    #[test]
    fn exit_releases() {
        let mut guard = ReentrancyGuard::new();
        guard.enter().unwrap();
        guard.exit();
        assert_eq!(guard.state(), LockState::Idle);
        assert!(guard.enter().is_ok());
    }
}
