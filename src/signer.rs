//! Digest signing.

use crate::config::SigningMode;
use crate::error::SignatureError;
use crate::hash::Digest;
use crate::keys::KeyPair;
use crate::manager::KeyManager;
use crate::observer::{self, Operation};
use crate::signature::Signature;
use k256::ecdsa::signature::hazmat::{PrehashSigner, RandomizedPrehashSigner};
use k256::ecdsa::Signature as EcdsaSignature;
use rand::rngs::OsRng;

impl KeyManager {
    /// Sign a digest with the key pair's private scalar.
    ///
    /// The digest bytes are used directly as the ECDSA message hash; pass
    /// the output of [`ObjectHasher::hash`](crate::ObjectHasher::hash), not
    /// raw data. Signatures are low-S and DER encoded.
    pub fn sign(&self, digest: &Digest, key_pair: &KeyPair) -> Result<Signature, SignatureError> {
        observer::instrument(self.observer.as_ref(), Operation::Sign, || {
            let prehash = digest.as_bytes();
            let signing_key = key_pair.signing_key();
            let signature = match self.config().signing_mode {
                SigningMode::Deterministic => {
                    PrehashSigner::<EcdsaSignature>::sign_prehash(signing_key, prehash)
                }
                SigningMode::Randomized => {
                    RandomizedPrehashSigner::<EcdsaSignature>::sign_prehash_with_rng(
                        signing_key,
                        &mut OsRng,
                        prehash,
                    )
                }
            }
            .map_err(|e| SignatureError::SigningFailed(e.to_string()))?;
            Ok(Signature::from_ecdsa(&signature))
        })
    }
}

/// Convenience function to sign a digest with the default manager.
pub fn sign_digest(digest: &Digest, key_pair: &KeyPair) -> Result<Signature, SignatureError> {
    KeyManager::new().sign(digest, key_pair)
}
