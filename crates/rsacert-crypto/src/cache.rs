//! Transform cache: one lazily built transform per key slot.
//!
//! Each slot is a small state machine, `Uninitialized` or `Ready(handle)`.
//! `KeyStore::set` drives the slot back to `Uninitialized`; the next encode or
//! decode builds a fresh handle. A `Ready` handle is only returned for the
//! exact key value (same `Arc`) it was built from, so a handle never outlives
//! its key even if a lookup races a reload.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rsa::{RsaPrivateKey, RsaPublicKey};

use rsacert_core::{CertResult, KeySlot};

use crate::transform::{BlockTransform, DecryptTransform, EncryptTransform};

enum TransformState<T> {
    Uninitialized,
    Ready(Arc<T>),
}

/// Thread-safe per-slot transform cache.
pub struct TransformCache {
    encrypt: Mutex<TransformState<EncryptTransform>>,
    decrypt: Mutex<TransformState<DecryptTransform>>,
}

impl TransformCache {
    pub fn new() -> Self {
        TransformCache {
            encrypt: Mutex::new(TransformState::Uninitialized),
            decrypt: Mutex::new(TransformState::Uninitialized),
        }
    }

    /// Encrypt transform for `key`, reusing the cached handle when it was
    /// built from the same key value.
    pub fn encrypt_transform(&self, key: &Arc<RsaPublicKey>) -> CertResult<Arc<EncryptTransform>> {
        let mut state = lock(&self.encrypt);
        get_or_build(&mut *state, key, EncryptTransform::new)
    }

    /// Decrypt transform for `key`; same contract as `encrypt_transform`.
    pub fn decrypt_transform(&self, key: &Arc<RsaPrivateKey>) -> CertResult<Arc<DecryptTransform>> {
        let mut state = lock(&self.decrypt);
        get_or_build(&mut *state, key, DecryptTransform::new)
    }

    /// Drop the cached transform for `slot`. The other slot is untouched.
    pub fn invalidate(&self, slot: KeySlot) {
        match slot {
            KeySlot::Public => *lock(&self.encrypt) = TransformState::Uninitialized,
            KeySlot::Private => *lock(&self.decrypt) = TransformState::Uninitialized,
        }
    }

    /// Returns true if `slot` currently holds a built transform.
    pub fn is_ready(&self, slot: KeySlot) -> bool {
        match slot {
            KeySlot::Public => matches!(*lock(&self.encrypt), TransformState::Ready(_)),
            KeySlot::Private => matches!(*lock(&self.decrypt), TransformState::Ready(_)),
        }
    }
}

impl Default for TransformCache {
    fn default() -> Self {
        Self::new()
    }
}

// Every write to a slot is a single assignment, so a poisoned lock still
// guards a consistent state.
fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn get_or_build<T, F>(state: &mut TransformState<T>, key: &Arc<T::Key>, build: F) -> CertResult<Arc<T>>
where
    T: BlockTransform,
    F: FnOnce(Arc<T::Key>) -> CertResult<T>,
{
    if let TransformState::Ready(transform) = state {
        if Arc::ptr_eq(transform.key(), key) {
            return Ok(Arc::clone(transform));
        }
    }
    let transform = Arc::new(build(Arc::clone(key))?);
    *state = TransformState::Ready(Arc::clone(&transform));
    Ok(transform)
}
