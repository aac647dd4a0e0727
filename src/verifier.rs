//! Signature verification.

use crate::error::SignatureError;
use crate::hash::Digest;
use crate::keys::parse_public_key;
use crate::manager::KeyManager;
use crate::observer::{self, Operation};
use crate::signature::Signature;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::Signature as EcdsaSignature;

impl KeyManager {
    /// Verify a signature against a hex-encoded public key and a digest.
    ///
    /// `Ok(())` means the signature is genuine. Any cryptographic failure is
    /// [`SignatureError::Mismatch`]; undecodable inputs get their own
    /// variants. There is no boolean "false" result to ignore.
    pub fn verify(
        &self,
        public_key_hex: &str,
        digest: &Digest,
        signature: &Signature,
    ) -> Result<(), SignatureError> {
        observer::instrument(self.observer.as_ref(), Operation::Verify, || {
            let public_key =
                parse_public_key(public_key_hex).map_err(SignatureError::MalformedPublicKey)?;
            let signature = signature.to_ecdsa()?;
            PrehashVerifier::<EcdsaSignature>::verify_prehash(
                &public_key,
                digest.as_bytes(),
                &signature,
            )
            .map_err(|_| SignatureError::Mismatch)
        })
    }
}

/// Convenience function to verify a signature with the default manager.
pub fn verify_signature(
    public_key_hex: &str,
    digest: &Digest,
    signature: &Signature,
) -> Result<(), SignatureError> {
    KeyManager::new().verify(public_key_hex, digest, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_bytes;
    use crate::keys::PublicKeyFormat;

    #[test]
    fn test_verify_valid_signature() {
        let manager = KeyManager::new();
        let keypair = manager.generate_key_pair().unwrap();
        let digest = hash_bytes(b"Test document content");
        let signature = manager.sign(&digest, &keypair).unwrap();

        for format in [PublicKeyFormat::Compressed, PublicKeyFormat::Uncompressed] {
            let public = keypair.public_key_hex(format);
            assert_eq!(manager.verify(&public, &digest, &signature), Ok(()));
        }
    }

    #[test]
    fn test_verify_with_other_key_fails() {
        let manager = KeyManager::new();
        let alice = manager.generate_key_pair().unwrap();
        let bob = manager.generate_key_pair().unwrap();
        let digest = hash_bytes(b"Test document content");
        let signature = manager.sign(&digest, &alice).unwrap();

        let result = manager.verify(&manager.export_public_key(&bob), &digest, &signature);
        assert_eq!(result, Err(SignatureError::Mismatch));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Signature does not match hash"
        );
    }

    #[test]
    fn test_verify_tampered_digest() {
        let manager = KeyManager::new();
        let keypair = manager.generate_key_pair().unwrap();
        let signature = manager.sign(&hash_bytes(b"original"), &keypair).unwrap();

        let result = manager.verify(
            &manager.export_public_key(&keypair),
            &hash_bytes(b"tampered"),
            &signature,
        );
        assert_eq!(result, Err(SignatureError::Mismatch));
    }

    #[test]
    fn test_verify_malformed_public_key() {
        let manager = KeyManager::new();
        let keypair = manager.generate_key_pair().unwrap();
        let digest = hash_bytes(b"data");
        let signature = manager.sign(&digest, &keypair).unwrap();

        assert!(matches!(
            manager.verify("not a key", &digest, &signature),
            Err(SignatureError::MalformedPublicKey(_))
        ));

        // Only 02/03 and 04 prefixes name a SEC1 point.
        let compressed = keypair.public_key_hex(PublicKeyFormat::Compressed);
        let compact = format!("05{}", &compressed[2..]);
        assert!(matches!(
            manager.verify(&compact, &digest, &signature),
            Err(SignatureError::MalformedPublicKey(_))
        ));
    }

    #[test]
    fn test_convenience_function() {
        let manager = KeyManager::new();
        let keypair = manager.generate_key_pair().unwrap();
        let digest = hash_bytes(b"data");
        let signature = manager.sign(&digest, &keypair).unwrap();

        assert!(verify_signature(&manager.export_public_key(&keypair), &digest, &signature).is_ok());
    }
}
