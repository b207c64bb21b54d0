//! Key store: an optional public key and an optional private key.
//!
//! The store never checks that the two halves belong together; loading a
//! public key from one pair and a private key from another is allowed and is
//! the caller's responsibility.

use std::sync::{Arc, PoisonError, RwLock};

use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;

use rsacert_core::{CertError, CertResult, KeySlot};

use crate::cache::TransformCache;
use crate::keys::{Key, KeyPair};
use crate::transform::{DecryptTransform, EncryptTransform};

/// Shared, thread-safe key slots plus their derived transforms.
#[derive(Default)]
pub struct KeyStore {
    public: RwLock<Option<Arc<RsaPublicKey>>>,
    private: RwLock<Option<Arc<RsaPrivateKey>>>,
    transforms: TransformCache,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store populated with both halves of a generated pair.
    pub fn from_keypair(pair: KeyPair) -> Self {
        let store = Self::new();
        let (public, private) = pair.into_keys();
        store.set(public);
        store.set(private);
        store
    }

    /// Install `key` in its slot and drop that slot's cached transform.
    ///
    /// Transforms already handed out keep working against the old key.
    pub fn set(&self, key: Key) {
        let slot = key.slot();
        match key {
            Key::Public(k) => {
                *self.public.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(k));
            }
            Key::Private(k) => {
                *self.private.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(k));
            }
        }
        self.transforms.invalidate(slot);
        debug!(%slot, "key slot updated");
    }

    pub fn get(&self, slot: KeySlot) -> Option<Key> {
        match slot {
            KeySlot::Public => self.public_key().map(|k| Key::Public((*k).clone())),
            KeySlot::Private => self.private_key().map(|k| Key::Private((*k).clone())),
        }
    }

    pub fn contains(&self, slot: KeySlot) -> bool {
        match slot {
            KeySlot::Public => self.public_key().is_some(),
            KeySlot::Private => self.private_key().is_some(),
        }
    }

    pub fn public_key(&self) -> Option<Arc<RsaPublicKey>> {
        self.public
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn private_key(&self) -> Option<Arc<RsaPrivateKey>> {
        self.private
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Encrypt transform for the current public key.
    pub fn encrypt_transform(&self) -> CertResult<Arc<EncryptTransform>> {
        let key = self.public_key().ok_or(CertError::MissingKey {
            slot: KeySlot::Public,
        })?;
        self.transforms.encrypt_transform(&key)
    }

    /// Decrypt transform for the current private key.
    pub fn decrypt_transform(&self) -> CertResult<Arc<DecryptTransform>> {
        let key = self.private_key().ok_or(CertError::MissingKey {
            slot: KeySlot::Private,
        })?;
        self.transforms.decrypt_transform(&key)
    }

    pub fn transforms(&self) -> &TransformCache {
        &self.transforms
    }
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore")
            .field("public", &self.contains(KeySlot::Public))
            .field("private", &self.contains(KeySlot::Private))
            .finish()
    }
}
