//! Observation hooks for cryptographic operations.
//!
//! Every [`KeyManager`](crate::KeyManager) and [`ObjectHasher`](crate::ObjectHasher)
//! operation reports when it starts, succeeds and fails. Observers only
//! watch; nothing they do can change a result.

use std::fmt;
use std::sync::Arc;

/// The operation an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// [`KeyManager::generate_key_pair`](crate::KeyManager::generate_key_pair).
    GenerateKeyPair,
    /// [`KeyManager::reconstruct_key_pair`](crate::KeyManager::reconstruct_key_pair).
    ReconstructKeyPair,
    /// [`KeyManager::validate`](crate::KeyManager::validate).
    ValidateKeyPair,
    /// [`KeyManager::verify_key_pair_match`](crate::KeyManager::verify_key_pair_match).
    VerifyKeyPairMatch,
    /// [`KeyManager::sign`](crate::KeyManager::sign).
    Sign,
    /// [`KeyManager::verify`](crate::KeyManager::verify).
    Verify,
    /// [`ObjectHasher::hash`](crate::ObjectHasher::hash) and its async variant.
    Hash,
}

impl Operation {
    /// Stable snake_case name, used as the `operation` field in log records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenerateKeyPair => "generate_key_pair",
            Self::ReconstructKeyPair => "reconstruct_key_pair",
            Self::ValidateKeyPair => "validate_key_pair",
            Self::VerifyKeyPairMatch => "verify_key_pair_match",
            Self::Sign => "sign",
            Self::Verify => "verify",
            Self::Hash => "hash",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in its lifecycle an operation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// The operation has begun.
    Started,
    /// The operation returned `Ok`.
    Succeeded,
    /// The operation returned an error, rendered with `Display`.
    Failed(&'a str),
}

/// A single observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoEvent<'a> {
    pub operation: Operation,
    pub outcome: Outcome<'a>,
}

/// Receives [`CryptoEvent`]s.
pub trait Observer: Send + Sync {
    fn observe(&self, event: &CryptoEvent<'_>);
}

/// Emits events as `tracing` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, event: &CryptoEvent<'_>) {
        let operation = event.operation.as_str();
        match event.outcome {
            Outcome::Started => tracing::debug!(operation, "starting"),
            Outcome::Succeeded => tracing::info!(operation, "completed"),
            Outcome::Failed(reason) => tracing::error!(operation, reason, "failed"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&self, _event: &CryptoEvent<'_>) {}
}

pub(crate) fn default_observer() -> Arc<dyn Observer> {
    Arc::new(TracingObserver)
}

/// Report start, then success or failure of `f`.
pub(crate) fn instrument<T, E, F>(observer: &dyn Observer, operation: Operation, f: F) -> Result<T, E>
where
    E: fmt::Display,
    F: FnOnce() -> Result<T, E>,
{
    observer.observe(&CryptoEvent {
        operation,
        outcome: Outcome::Started,
    });
    let result = f();
    report(observer, operation, &result);
    result
}

pub(crate) fn report<T, E: fmt::Display>(
    observer: &dyn Observer,
    operation: Operation,
    result: &Result<T, E>,
) {
    match result {
        Ok(_) => observer.observe(&CryptoEvent {
            operation,
            outcome: Outcome::Succeeded,
        }),
        Err(err) => {
            let reason = err.to_string();
            observer.observe(&CryptoEvent {
                operation,
                outcome: Outcome::Failed(&reason),
            });
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records events as `(operation, outcome)` strings.
    #[derive(Default)]
    pub struct RecordingObserver {
        pub events: Mutex<Vec<(Operation, String)>>,
    }

    impl RecordingObserver {
        pub fn take(&self) -> Vec<(Operation, String)> {
            std::mem::take(&mut *self.events.lock().unwrap())
        }
    }

    impl Observer for RecordingObserver {
        fn observe(&self, event: &CryptoEvent<'_>) {
            let outcome = match event.outcome {
                Outcome::Started => "started".to_string(),
                Outcome::Succeeded => "succeeded".to_string(),
                Outcome::Failed(reason) => format!("failed: {}", reason),
            };
            self.events.lock().unwrap().push((event.operation, outcome));
        }
    }
}
