//! Error types for the blockr-crypto library.

use std::fmt;
use thiserror::Error;

/// Message carried by every [`KeyPairError`].
pub const KEY_PAIR_FAILURE: &str = "Key pair verification failed";

/// Reason reported when a signature (or a key pair round trip) does not verify.
pub const SIGNATURE_MISMATCH: &str = "Signature does not match hash";

/// A hex or SEC1 encoding that could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Input is not valid hexadecimal.
    #[error("invalid hex in {what}: {detail}")]
    Hex { what: &'static str, detail: String },

    /// Input decoded to the wrong number of bytes.
    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    Length {
        what: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// Bytes decoded but are not a valid secp256k1 value.
    #[error("{0} is not a valid secp256k1 encoding")]
    Curve(&'static str),
}

impl EncodingError {
    pub(crate) fn hex(what: &'static str, err: hex::FromHexError) -> Self {
        Self::Hex {
            what,
            detail: err.to_string(),
        }
    }
}

/// Which key pair check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPairErrorKind {
    /// A public or private key encoding could not be parsed.
    MalformedEncoding,
    /// The public point is off the curve or the point at infinity.
    InvalidPoint,
    /// The public and private components do not correspond.
    Mismatch,
    /// The sign/verify round trip failed for a reason other than a mismatch.
    RoundTrip,
}

impl fmt::Display for KeyPairErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedEncoding => "malformed encoding",
            Self::InvalidPoint => "invalid point",
            Self::Mismatch => "mismatched pair",
            Self::RoundTrip => "round trip failure",
        };
        f.write_str(name)
    }
}

/// A key pair that failed generation, reconstruction or validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}: {reason}")]
pub struct KeyPairError {
    pub kind: KeyPairErrorKind,
    pub message: String,
    pub reason: String,
}

impl KeyPairError {
    /// Build an error of the given kind. `message` is always
    /// "Key pair verification failed"; `reason` carries the detail.
    pub fn new(kind: KeyPairErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            message: KEY_PAIR_FAILURE.to_string(),
            reason: reason.into(),
        }
    }

    /// The pair parsed but its components do not belong together.
    pub fn mismatch() -> Self {
        Self::new(KeyPairErrorKind::Mismatch, SIGNATURE_MISMATCH)
    }
}

impl From<EncodingError> for KeyPairError {
    fn from(err: EncodingError) -> Self {
        Self::new(KeyPairErrorKind::MalformedEncoding, err.to_string())
    }
}

impl From<SignatureError> for KeyPairError {
    fn from(err: SignatureError) -> Self {
        let kind = match err {
            SignatureError::Mismatch => KeyPairErrorKind::Mismatch,
            _ => KeyPairErrorKind::RoundTrip,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<HashingError> for KeyPairError {
    fn from(err: HashingError) -> Self {
        Self::new(KeyPairErrorKind::RoundTrip, err.to_string())
    }
}

/// Signing or signature verification failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature does not verify against the public key and digest.
    #[error("Signature does not match hash")]
    Mismatch,

    /// The public key could not be decoded.
    #[error("Invalid public key: {0}")]
    MalformedPublicKey(EncodingError),

    /// The signature is not valid hex or not a valid DER ECDSA signature.
    #[error("Invalid signature encoding: {0}")]
    MalformedSignature(String),

    /// The signer rejected the digest.
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

/// An object could not be hashed, or a digest could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashingError {
    /// The value could not be serialized canonically.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// A digest string was not 16 bytes of hex.
    #[error("Invalid digest: {0}")]
    InvalidDigest(EncodingError),

    /// The offloaded hashing task did not complete.
    #[error("Hashing task failed: {0}")]
    Task(String),
}

impl From<serde_json::Error> for HashingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// The main error type for blockr-crypto operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Error reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error with JSON configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    KeyPair(#[from] KeyPairError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Hashing(#[from] HashingError),
}

/// Result type alias for blockr-crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pair_error_display() {
        let err = KeyPairError::mismatch();
        assert_eq!(err.kind, KeyPairErrorKind::Mismatch);
        assert_eq!(
            err.to_string(),
            "Key pair verification failed: Signature does not match hash"
        );
    }

    #[test]
    fn test_signature_error_wraps_into_key_pair_error() {
        let err = KeyPairError::from(SignatureError::Mismatch);
        assert_eq!(err.kind, KeyPairErrorKind::Mismatch);
        assert_eq!(err.reason, SIGNATURE_MISMATCH);

        let err = KeyPairError::from(SignatureError::SigningFailed("bad".into()));
        assert_eq!(err.kind, KeyPairErrorKind::RoundTrip);
        assert_eq!(err.reason, "Signing failed: bad");
    }

    #[test]
    fn test_encoding_error_is_malformed() {
        let err = KeyPairError::from(EncodingError::Length {
            what: "private key",
            expected: "32",
            actual: 3,
        });
        assert_eq!(err.kind, KeyPairErrorKind::MalformedEncoding);
        assert!(err.reason.contains("expected 32 bytes, got 3"));
    }
}
