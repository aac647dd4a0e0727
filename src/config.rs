//! Key manager configuration.

use crate::error::Result;
use crate::keys::PublicKeyFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How ECDSA nonces are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningMode {
    /// RFC 6979: the same key and digest always give the same signature.
    #[default]
    Deterministic,
    /// RFC 6979 with extra OS randomness mixed into the nonce.
    Randomized,
}

/// Settings for a [`KeyManager`](crate::KeyManager).
///
/// The curve is always secp256k1 and is not part of the configuration.
///
/// ```json
/// { "public_key_format": "uncompressed", "signing_mode": "randomized" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyManagerConfig {
    /// Encoding used by [`KeyManager::export_public_key`](crate::KeyManager::export_public_key).
    pub public_key_format: PublicKeyFormat,
    pub signing_mode: SigningMode,
}

impl KeyManagerConfig {
    /// Set the encoding used by [`KeyManager::export_public_key`](crate::KeyManager::export_public_key).
    pub fn with_public_key_format(mut self, format: PublicKeyFormat) -> Self {
        self.public_key_format = format;
        self
    }

    /// Choose between RFC 6979 and hedged nonces when signing.
    pub fn with_signing_mode(mut self, mode: SigningMode) -> Self {
        self.signing_mode = mode;
        self
    }

    /// Parse a configuration from a JSON string. Missing fields take their
    /// defaults; unknown fields are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Serialize the configuration to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }

    /// Load a configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptoError;

    #[test]
    fn test_defaults() {
        let config = KeyManagerConfig::default();
        assert_eq!(config.public_key_format, PublicKeyFormat::Compressed);
        assert_eq!(config.signing_mode, SigningMode::Deterministic);
        assert_eq!(KeyManagerConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn test_from_json() {
        let config = KeyManagerConfig::from_json(
            r#"{ "public_key_format": "uncompressed", "signing_mode": "randomized" }"#,
        )
        .unwrap();
        assert_eq!(config.public_key_format, PublicKeyFormat::Uncompressed);
        assert_eq!(config.signing_mode, SigningMode::Randomized);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result = KeyManagerConfig::from_json(r#"{ "curve": "p256" }"#);
        assert!(matches!(result, Err(CryptoError::Json(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = KeyManagerConfig::default().with_signing_mode(SigningMode::Randomized);
        let json = config.to_json().unwrap();
        assert_eq!(KeyManagerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crypto.json");
        fs::write(&path, r#"{ "public_key_format": "uncompressed" }"#).unwrap();

        let config = KeyManagerConfig::load_from_file(&path).unwrap();
        assert_eq!(config.public_key_format, PublicKeyFormat::Uncompressed);
        assert_eq!(config.signing_mode, SigningMode::Deterministic);

        let missing = KeyManagerConfig::load_from_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(CryptoError::Io(_))));
    }
}
