//! Canonical object hashing.
//!
//! Values are converted to JSON with every object's keys sorted in ascending
//! byte order, written without whitespace, and hashed with BLAKE3 in
//! extendable-output mode truncated to [`DIGEST_SIZE`] bytes.

use crate::error::{EncodingError, HashingError};
use crate::observer::{self, default_observer, Observer, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// The size of a digest in bytes (128 bits).
pub const DIGEST_SIZE: usize = 16;

/// A fixed-length hash of canonically serialized data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Create a digest from raw bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the digest.
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Encode the digest as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode a digest from a hexadecimal string.
    pub fn from_hex(s: &str) -> Result<Self, HashingError> {
        let bytes = hex::decode(s)
            .map_err(|e| HashingError::InvalidDigest(EncodingError::hex("digest", e)))?;
        let arr: [u8; DIGEST_SIZE] = bytes.as_slice().try_into().map_err(|_| {
            HashingError::InvalidDigest(EncodingError::Length {
                what: "digest",
                expected: "16",
                actual: bytes.len(),
            })
        })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Digest {
    type Error = HashingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.to_hex()
    }
}

/// Hash bytes that are already in canonical form.
pub fn hash_bytes(data: &[u8]) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(data);
    let mut out = [0u8; DIGEST_SIZE];
    hasher.finalize_xof().fill(&mut out);
    Digest(out)
}

/// Serialize a value to its canonical byte form.
pub fn canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, HashingError> {
    let value = canonicalize(serde_json::to_value(value)?);
    Ok(serde_json::to_vec(&value)?)
}

// Rebuild objects with sorted keys so the output does not depend on
// serde_json's map representation.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (key, value) in entries {
                sorted.insert(key, canonicalize(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Computes digests of arbitrary serializable values.
#[derive(Clone)]
pub struct ObjectHasher {
    observer: Arc<dyn Observer>,
}

impl ObjectHasher {
    /// Create a hasher that reports to the tracing observer.
    pub fn new() -> Self {
        Self {
            observer: default_observer(),
        }
    }

    /// Replace the observer notified about each hash.
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    /// Hash a value.
    ///
    /// Fails with [`HashingError::Serialization`] if the value cannot be
    /// represented as JSON, for example a map with non-string keys.
    pub fn hash<T: Serialize + ?Sized>(&self, value: &T) -> Result<Digest, HashingError> {
        observer::instrument(self.observer.as_ref(), Operation::Hash, || {
            canonical_bytes(value).map(|bytes| hash_bytes(&bytes))
        })
    }

    /// Hash a value, running the hash function on Tokio's blocking pool.
    ///
    /// Serialization happens on the calling task. When no Tokio runtime is
    /// running (for example under another executor) the hash is computed
    /// inline instead.
    pub async fn hash_async<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Digest, HashingError> {
        let sink = self.observer.as_ref();
        sink.observe(&observer::CryptoEvent {
            operation: Operation::Hash,
            outcome: observer::Outcome::Started,
        });

        let result = match canonical_bytes(value) {
            Ok(bytes) => match tokio::runtime::Handle::try_current() {
                Ok(handle) => handle
                    .spawn_blocking(move || hash_bytes(&bytes))
                    .await
                    .map_err(|e| HashingError::Task(e.to_string())),
                Err(_) => Ok(hash_bytes(&bytes)),
            },
            Err(e) => Err(e),
        };

        observer::report(sink, Operation::Hash, &result);
        result
    }
}

impl Default for ObjectHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHasher").finish_non_exhaustive()
    }
}
