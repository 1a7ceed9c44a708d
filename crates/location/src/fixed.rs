//! In-process stand-ins for the platform location and permission services.
//!
//! Used by the CLI (which has no device to ask) and by tests.

use crate::provider::{LocationFix, LocationProvider, PermissionChecker, PlatformError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum Outcome {
    Fix(LocationFix),
    NoFix,
    Fail(String),
}

/// Location provider answering every request with the same outcome.
#[derive(Debug)]
pub struct StaticLocationProvider {
    outcome: Outcome,
    calls: AtomicUsize,
}

impl StaticLocationProvider {
    /// Always resolves with `fix`
    pub fn with_fix(fix: LocationFix) -> Self {
        Self::from_outcome(Outcome::Fix(fix))
    }

    /// Always resolves with no cached fix
    pub fn without_fix() -> Self {
        Self::from_outcome(Outcome::NoFix)
    }

    /// Always fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_outcome(Outcome::Fail(message.into()))
    }

    fn from_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `last_location` was awaited
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LocationProvider for StaticLocationProvider {
    async fn last_location(&self) -> Result<Option<LocationFix>, PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Completion is delivered later, never inline with the request.
        tokio::task::yield_now().await;

        match &self.outcome {
            Outcome::Fix(fix) => Ok(Some(*fix)),
            Outcome::NoFix => Ok(None),
            Outcome::Fail(message) => Err(PlatformError::new(message.clone())),
        }
    }
}

/// Permission state that can be flipped at runtime.
#[derive(Debug)]
pub struct StaticPermission {
    granted: AtomicBool,
    failure: Option<String>,
}

impl StaticPermission {
    pub fn granted() -> Self {
        Self {
            granted: AtomicBool::new(true),
            failure: None,
        }
    }

    pub fn denied() -> Self {
        Self {
            granted: AtomicBool::new(false),
            failure: None,
        }
    }

    /// Every check fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            granted: AtomicBool::new(false),
            failure: Some(message.into()),
        }
    }

    pub fn set_granted(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }
}

impl PermissionChecker for StaticPermission {
    fn has_fine_location(&self) -> Result<bool, PlatformError> {
        match &self.failure {
            Some(message) => Err(PlatformError::new(message.clone())),
            None => Ok(self.granted.load(Ordering::SeqCst)),
        }
    }
}
