//! secp256k1 key pairs and their hex encodings.

use crate::error::{EncodingError, KeyPairError, KeyPairErrorKind};
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::FromEncodedPoint;
use k256::{AffinePoint, ProjectivePoint, Scalar};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Name of the only supported curve.
pub const CURVE_NAME: &str = "secp256k1";

/// Length of a private scalar in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Length of a compressed SEC1 public key.
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

/// Length of an uncompressed SEC1 public key.
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

/// SEC1 encoding used when exporting a public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicKeyFormat {
    /// `0x02`/`0x03` prefix followed by X (33 bytes).
    #[default]
    Compressed,
    /// `0x04` prefix followed by X and Y (65 bytes).
    Uncompressed,
}

impl PublicKeyFormat {
    fn is_compressed(self) -> bool {
        matches!(self, Self::Compressed)
    }
}

/// A secp256k1 key pair.
///
/// Only [`KeyManager`](crate::KeyManager) hands these out, and only after
/// the pair has passed validation. The private scalar is wiped on drop and
/// the type is not `Clone`.
pub struct KeyPair {
    signing_key: SigningKey,
    public_key: VerifyingKey,
}

impl KeyPair {
    pub(crate) fn random() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        let public_key = *signing_key.verifying_key();
        Self {
            signing_key,
            public_key,
        }
    }

    pub(crate) fn from_parts(signing_key: SigningKey, public_key: VerifyingKey) -> Self {
        Self {
            signing_key,
            public_key,
        }
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// The public key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.public_key
    }

    /// SEC1 bytes of the public key.
    pub fn public_key_bytes(&self, format: PublicKeyFormat) -> Vec<u8> {
        self.public_key
            .to_encoded_point(format.is_compressed())
            .as_bytes()
            .to_vec()
    }

    /// Hex encoding of the public key.
    pub fn public_key_hex(&self, format: PublicKeyFormat) -> String {
        hex::encode(self.public_key_bytes(format))
    }

    /// Raw private scalar.
    pub fn private_key_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        Zeroizing::new(self.signing_key.to_bytes().into())
    }

    /// Hex encoding of the private scalar.
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        let bytes = self.private_key_bytes();
        Zeroizing::new(hex::encode(&*bytes))
    }

    /// Run every key pair check: the public point is on the curve, is not
    /// the identity, and equals private·G.
    pub(crate) fn check(&self) -> Result<(), KeyPairError> {
        let public = ProjectivePoint::from(*self.public_key.as_affine());
        if public == ProjectivePoint::IDENTITY {
            return Err(KeyPairError::new(
                KeyPairErrorKind::InvalidPoint,
                "public key is the point at infinity",
            ));
        }

        let encoded = self.public_key.to_encoded_point(false);
        if !bool::from(AffinePoint::from_encoded_point(&encoded).is_some()) {
            return Err(KeyPairError::new(
                KeyPairErrorKind::InvalidPoint,
                "public key is not on the curve",
            ));
        }

        let scalar: &Scalar = self.signing_key.as_nonzero_scalar().as_ref();
        if ProjectivePoint::GENERATOR * *scalar != public {
            return Err(KeyPairError::mismatch());
        }
        Ok(())
    }
}

// Never print the private key.
impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key_hex(PublicKeyFormat::Compressed))
            .finish_non_exhaustive()
    }
}

/// Parse a hex SEC1 public key, compressed or uncompressed.
pub fn parse_public_key(public_key_hex: &str) -> Result<VerifyingKey, EncodingError> {
    let bytes = hex::decode(public_key_hex.trim())
        .map_err(|e| EncodingError::hex("public key", e))?;
    if bytes.len() != COMPRESSED_PUBLIC_KEY_SIZE && bytes.len() != UNCOMPRESSED_PUBLIC_KEY_SIZE {
        return Err(EncodingError::Length {
            what: "public key",
            expected: "33 or 65",
            actual: bytes.len(),
        });
    }
    // The tag must agree with the length: 02/03 for 33 bytes, 04 for 65.
    match (bytes.len(), bytes[0]) {
        (COMPRESSED_PUBLIC_KEY_SIZE, 0x02 | 0x03) | (UNCOMPRESSED_PUBLIC_KEY_SIZE, 0x04) => {}
        _ => return Err(EncodingError::Curve("public key")),
    }
    VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| EncodingError::Curve("public key"))
}

/// Parse a hex private scalar. Must be exactly 32 bytes, non-zero and below
/// the group order.
pub fn parse_private_key(private_key_hex: &str) -> Result<SigningKey, EncodingError> {
    let mut bytes = hex::decode(private_key_hex.trim())
        .map_err(|e| EncodingError::hex("private key", e))?;
    let result = if bytes.len() != PRIVATE_KEY_SIZE {
        Err(EncodingError::Length {
            what: "private key",
            expected: "32",
            actual: bytes.len(),
        })
    } else {
        SigningKey::from_slice(&bytes).map_err(|_| EncodingError::Curve("private key"))
    };
    bytes.zeroize();
    result
}
