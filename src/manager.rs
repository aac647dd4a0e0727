//! Key pair generation, reconstruction and validation.

use crate::config::KeyManagerConfig;
use crate::error::KeyPairError;
use crate::hash::ObjectHasher;
use crate::keys::{parse_private_key, parse_public_key, KeyPair, PublicKeyFormat, CURVE_NAME};
use crate::observer::{self, default_observer, Observer, Operation};
use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::json;
use std::fmt;
use std::sync::Arc;

/// Generates, reconstructs and validates secp256k1 key pairs, and signs and
/// verifies digests with them.
///
/// Holds no mutable state; share it freely between threads.
#[derive(Clone)]
pub struct KeyManager {
    config: KeyManagerConfig,
    hasher: ObjectHasher,
    pub(crate) observer: Arc<dyn Observer>,
}

impl KeyManager {
    /// Create a manager with the default configuration.
    pub fn new() -> Self {
        Self::with_config(KeyManagerConfig::default())
    }

    /// Create a manager with the given configuration.
    pub fn with_config(config: KeyManagerConfig) -> Self {
        Self {
            config,
            hasher: ObjectHasher::new(),
            observer: default_observer(),
        }
    }

    /// Replace the observer notified about each operation. The internal
    /// hasher used for key pair round trips reports to the same observer.
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.hasher = self.hasher.with_observer(observer.clone());
        self.observer = observer;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &KeyManagerConfig {
        &self.config
    }

    /// The curve every key pair lives on.
    pub fn curve(&self) -> &'static str {
        CURVE_NAME
    }

    /// Generate a new random key pair.
    ///
    /// The pair is validated before it is returned; a failure here points at
    /// a broken random source and is surfaced rather than retried.
    pub fn generate_key_pair(&self) -> Result<KeyPair, KeyPairError> {
        observer::instrument(self.observer.as_ref(), Operation::GenerateKeyPair, || {
            self.validate(KeyPair::random())
        })
    }

    /// Rebuild a key pair from its hex encodings and validate it.
    pub fn reconstruct_key_pair(
        &self,
        public_key_hex: &str,
        private_key_hex: &str,
    ) -> Result<KeyPair, KeyPairError> {
        observer::instrument(self.observer.as_ref(), Operation::ReconstructKeyPair, || {
            let signing_key = parse_private_key(private_key_hex)?;
            let public_key = parse_public_key(public_key_hex)?;
            self.validate(KeyPair::from_parts(signing_key, public_key))
        })
    }

    /// Check that the public point is on the curve, is not the point at
    /// infinity, and equals private·G.
    pub fn validate(&self, key_pair: KeyPair) -> Result<KeyPair, KeyPairError> {
        observer::instrument(self.observer.as_ref(), Operation::ValidateKeyPair, || {
            key_pair.check().map(|()| key_pair)
        })
    }

    /// Reconstruct a key pair and prove it works: sign a freshly hashed
    /// random nonce with the private key and verify it with the public key.
    pub fn verify_key_pair_match(
        &self,
        public_key_hex: &str,
        private_key_hex: &str,
    ) -> Result<KeyPair, KeyPairError> {
        observer::instrument(self.observer.as_ref(), Operation::VerifyKeyPairMatch, || {
            let key_pair = self.reconstruct_key_pair(public_key_hex, private_key_hex)?;

            let mut nonce = [0u8; 16];
            OsRng.fill_bytes(&mut nonce);
            let digest = self.hasher.hash(&json!({ "data": hex::encode(nonce) }))?;

            let signature = self.sign(&digest, &key_pair)?;
            let public_key = key_pair.public_key_hex(PublicKeyFormat::Compressed);
            self.verify(&public_key, &digest, &signature)?;

            Ok(key_pair)
        })
    }

    /// Hex encoding of the public key in the configured format.
    pub fn export_public_key(&self, key_pair: &KeyPair) -> String {
        key_pair.public_key_hex(self.config.public_key_format)
    }
}

impl Default for KeyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyManager")
            .field("curve", &CURVE_NAME)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Convenience function to generate a key pair with the default manager.
pub fn generate_key_pair() -> Result<KeyPair, KeyPairError> {
    KeyManager::new().generate_key_pair()
}
