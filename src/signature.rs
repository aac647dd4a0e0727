//! DER-encoded ECDSA signatures.

use crate::error::SignatureError;
use k256::ecdsa::Signature as EcdsaSignature;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A DER-encoded secp256k1 ECDSA signature.
///
/// Serializes as its lowercase hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signature {
    der: Vec<u8>,
}

impl Signature {
    pub(crate) fn from_ecdsa(signature: &EcdsaSignature) -> Self {
        Self {
            der: signature.to_der().as_bytes().to_vec(),
        }
    }

    /// Parse a DER-encoded signature.
    pub fn from_der(bytes: &[u8]) -> Result<Self, SignatureError> {
        EcdsaSignature::from_der(bytes)
            .map_err(|e| SignatureError::MalformedSignature(e.to_string()))?;
        Ok(Self {
            der: bytes.to_vec(),
        })
    }

    /// Parse a hex-encoded DER signature.
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| SignatureError::MalformedSignature(e.to_string()))?;
        Self::from_der(&bytes)
    }

    /// The DER bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.der
    }

    /// The DER bytes as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.der)
    }

    /// Decode into an (r, s) pair, normalizing S to the lower half of the
    /// group order.
    pub(crate) fn to_ecdsa(&self) -> Result<EcdsaSignature, SignatureError> {
        let signature = EcdsaSignature::from_der(&self.der)
            .map_err(|e| SignatureError::MalformedSignature(e.to_string()))?;
        Ok(signature.normalize_s().unwrap_or(signature))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Signature {
    type Error = SignatureError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.to_hex()
    }
}
