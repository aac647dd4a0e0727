//! # blockr-crypto
//!
//! Key pairs, signatures and object hashing for the blockr ledger.
//!
//! ## Features
//!
//! - **secp256k1 ECDSA** key pairs with hex import/export and validation
//! - **DER signatures** over 128-bit digests, deterministic (RFC 6979) by default
//! - **Canonical object hashing**: sorted-key JSON hashed with BLAKE3
//! - **Observer hooks** reporting each operation through `tracing`
//!
//! ## Quick Start
//!
//! ### Generate a Key Pair
//!
//! ```rust
//! use blockr_crypto::{KeyManager, PublicKeyFormat};
//!
//! let manager = KeyManager::new();
//! let keypair = manager.generate_key_pair().unwrap();
//!
//! let public_hex = keypair.public_key_hex(PublicKeyFormat::Compressed);
//! assert_eq!(public_hex.len(), 66);
//! ```
//!
//! ### Hash, Sign and Verify
//!
//! ```rust
//! use blockr_crypto::{KeyManager, ObjectHasher, SignatureError};
//! use serde_json::json;
//!
//! let manager = KeyManager::new();
//! let hasher = ObjectHasher::new();
//!
//! let keypair = manager.generate_key_pair().unwrap();
//! let digest = hasher.hash(&json!({ "data": "x" })).unwrap();
//! let signature = manager.sign(&digest, &keypair).unwrap();
//!
//! let public_key = manager.export_public_key(&keypair);
//! assert!(manager.verify(&public_key, &digest, &signature).is_ok());
//!
//! let stranger = manager.generate_key_pair().unwrap();
//! let result = manager.verify(&manager.export_public_key(&stranger), &digest, &signature);
//! assert_eq!(result, Err(SignatureError::Mismatch));
//! ```
//!
//! ### Check an Imported Key Pair
//!
//! ```rust
//! use blockr_crypto::{KeyManager, PublicKeyFormat};
//!
//! let manager = KeyManager::new();
//! let original = manager.generate_key_pair().unwrap();
//!
//! let restored = manager
//!     .verify_key_pair_match(
//!         &original.public_key_hex(PublicKeyFormat::Uncompressed),
//!         &original.private_key_hex(),
//!     )
//!     .unwrap();
//! assert_eq!(restored.verifying_key(), original.verifying_key());
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod keys;
pub mod manager;
pub mod observer;
pub mod signature;
pub mod signer;
pub mod verifier;

// Re-export main types for convenience
pub use config::{KeyManagerConfig, SigningMode};
pub use error::{
    CryptoError, EncodingError, HashingError, KeyPairError, KeyPairErrorKind, Result,
    SignatureError, KEY_PAIR_FAILURE, SIGNATURE_MISMATCH,
};
pub use hash::{canonical_bytes, hash_bytes, Digest, ObjectHasher, DIGEST_SIZE};
pub use keys::{KeyPair, PublicKeyFormat, CURVE_NAME};
pub use manager::{generate_key_pair, KeyManager};
pub use observer::{CryptoEvent, NoopObserver, Observer, Operation, Outcome, TracingObserver};
pub use signature::Signature;
pub use signer::sign_digest;
pub use verifier::verify_signature;
