//! Per-segment RSA PKCS#1 v1.5 transforms bound to one key value.
//!
//! A transform is immutable once built. Every `apply` call draws fresh
//! randomness (padding for encryption, blinding for decryption), so a single
//! handle can be shared across threads behind an `Arc`.

use std::sync::Arc;

use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use tracing::debug;

use rsacert_core::{CertResult, KeySlot};

use crate::block::BlockPolicy;

/// A keyed block transform used by the chunked codec.
pub trait BlockTransform: Send + Sync {
    /// Key type the transform is bound to.
    type Key;

    /// The exact key value this transform was built for.
    fn key(&self) -> &Arc<Self::Key>;

    fn policy(&self) -> BlockPolicy;

    /// Largest input segment accepted by `apply`.
    fn input_block_size(&self) -> usize;

    fn apply(&self, segment: &[u8]) -> Result<Vec<u8>, rsa::Error>;
}

/// Encrypt-mode transform bound to a public key.
pub struct EncryptTransform {
    key: Arc<RsaPublicKey>,
    policy: BlockPolicy,
}

impl EncryptTransform {
    pub fn new(key: Arc<RsaPublicKey>) -> CertResult<Self> {
        let policy = BlockPolicy::for_modulus(KeySlot::Public, key.size())?;
        debug!(
            bits = key.n().bits(),
            block = policy.plaintext_block_size(),
            "built encrypt transform"
        );
        Ok(Self { key, policy })
    }
}

impl BlockTransform for EncryptTransform {
    type Key = RsaPublicKey;

    fn key(&self) -> &Arc<RsaPublicKey> {
        &self.key
    }

    fn policy(&self) -> BlockPolicy {
        self.policy
    }

    fn input_block_size(&self) -> usize {
        self.policy.plaintext_block_size()
    }

    fn apply(&self, segment: &[u8]) -> Result<Vec<u8>, rsa::Error> {
        self.key
            .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, segment)
    }
}

/// Decrypt-mode transform bound to a private key.
pub struct DecryptTransform {
    key: Arc<RsaPrivateKey>,
    policy: BlockPolicy,
}

impl DecryptTransform {
    pub fn new(key: Arc<RsaPrivateKey>) -> CertResult<Self> {
        let policy = BlockPolicy::for_modulus(KeySlot::Private, key.size())?;
        debug!(
            bits = key.n().bits(),
            block = policy.ciphertext_block_size(),
            "built decrypt transform"
        );
        Ok(Self { key, policy })
    }
}

impl BlockTransform for DecryptTransform {
    type Key = RsaPrivateKey;

    fn key(&self) -> &Arc<RsaPrivateKey> {
        &self.key
    }

    fn policy(&self) -> BlockPolicy {
        self.policy
    }

    fn input_block_size(&self) -> usize {
        self.policy.ciphertext_block_size()
    }

    fn apply(&self, segment: &[u8]) -> Result<Vec<u8>, rsa::Error> {
        // Blinded so decryption timing does not depend on the ciphertext.
        self.key
            .decrypt_blinded(&mut rand::thread_rng(), Pkcs1v15Encrypt, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_keys::keypair;

    #[test]
    fn test_encrypt_segment_is_modulus_sized() {
        let t = EncryptTransform::new(Arc::new(keypair().public.clone())).unwrap();
        assert_eq!(t.input_block_size(), 117);

        let short = t.apply(b"x").unwrap();
        let full = t.apply(&[7u8; 117]).unwrap();
        assert_eq!(short.len(), 128);
        assert_eq!(full.len(), 128);
    }

    #[test]
    fn test_encrypt_rejects_oversized_segment() {
        let t = EncryptTransform::new(Arc::new(keypair().public.clone())).unwrap();
        assert!(t.apply(&[0u8; 118]).is_err());
    }

    #[test]
    fn test_segment_roundtrip() {
        let pair = keypair();
        let enc = EncryptTransform::new(Arc::new(pair.public.clone())).unwrap();
        let dec = DecryptTransform::new(Arc::new(pair.private.clone())).unwrap();
        assert_eq!(dec.input_block_size(), 128);

        let ct = enc.apply(b"one segment").unwrap();
        assert_eq!(dec.apply(&ct).unwrap(), b"one segment");
    }

    #[test]
    fn test_transform_bound_to_its_key() {
        let key = Arc::new(keypair().public.clone());
        let t = EncryptTransform::new(Arc::clone(&key)).unwrap();
        assert!(Arc::ptr_eq(t.key(), &key));
    }
}
