//! `RsaCert`: key slots, cached transforms and the chunked codec behind one handle.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::{debug, info};
use zeroize::Zeroizing;

use rsacert_core::config::DEFAULT_KEY_BITS;
use rsacert_core::{CertError, CertResult, KeyEncoding, KeySlot};

use crate::block::BlockPolicy;
use crate::keys::{generate_keypair, load_key, serialize_key};
use crate::store::KeyStore;
use crate::transform::BlockTransform;
use crate::{codec, io};

/// Encrypts with the public slot, decrypts with the private slot.
///
/// Either slot may be empty: an encrypt-only peer loads just the public key,
/// a decrypt-only peer just the private key.
#[derive(Debug, Default)]
pub struct RsaCert {
    store: KeyStore,
}

impl RsaCert {
    /// Instance with no keys loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh 1024-bit keypair.
    pub fn generate() -> CertResult<Self> {
        Self::generate_with_bits(DEFAULT_KEY_BITS)
    }

    pub fn generate_with_bits(bits: usize) -> CertResult<Self> {
        let pair = generate_keypair(bits)?;
        Ok(Self {
            store: KeyStore::from_keypair(pair),
        })
    }

    /// Instance holding a single key decoded from `bytes`.
    pub fn from_key_bytes(bytes: &[u8], slot: KeySlot, encoding: KeyEncoding) -> CertResult<Self> {
        let cert = Self::new();
        cert.load_key(bytes, slot, encoding)?;
        Ok(cert)
    }

    /// Instance holding a single key read from a key file.
    pub fn from_key_file(path: &Path, slot: KeySlot, encoding: KeyEncoding) -> CertResult<Self> {
        let cert = Self::new();
        cert.load_key_file(path, slot, encoding)?;
        Ok(cert)
    }

    /// Instance holding a single key drained from `reader`.
    pub fn from_reader<R: Read>(reader: R, slot: KeySlot, encoding: KeyEncoding) -> CertResult<Self> {
        let bytes = Zeroizing::new(io::read_all_from(reader)?);
        Self::from_key_bytes(&bytes, slot, encoding)
    }

    /// Replace the key in `slot`. On a parse failure the store is unchanged.
    pub fn load_key(&self, bytes: &[u8], slot: KeySlot, encoding: KeyEncoding) -> CertResult<()> {
        let key = load_key(bytes, slot, encoding)?;
        self.store.set(key);
        Ok(())
    }

    pub fn load_key_file(&self, path: &Path, slot: KeySlot, encoding: KeyEncoding) -> CertResult<()> {
        let bytes = Zeroizing::new(io::read_all(path)?);
        self.load_key(&bytes, slot, encoding)?;
        info!(%slot, path = %path.display(), "loaded key file");
        Ok(())
    }

    /// Encoded bytes of the key in `slot`.
    pub fn export_key(&self, slot: KeySlot, encoding: KeyEncoding) -> CertResult<Zeroizing<Vec<u8>>> {
        let key = self.store.get(slot).ok_or(CertError::MissingKey { slot })?;
        serialize_key(&key, encoding)
    }

    /// Write the key in `slot` to `path`. Private keys are written owner-only.
    pub fn save_key(&self, path: &Path, slot: KeySlot, encoding: KeyEncoding) -> CertResult<()> {
        let bytes = self.export_key(slot, encoding)?;
        match slot {
            KeySlot::Public => io::write_all(path, &bytes)?,
            KeySlot::Private => io::write_secret(path, &bytes)?,
        }
        info!(%slot, %encoding, path = %path.display(), "saved key file");
        Ok(())
    }

    /// Encrypt arbitrary bytes with the public key.
    pub fn encode_data(&self, data: &[u8]) -> CertResult<Vec<u8>> {
        let transform = self.store.encrypt_transform()?;
        codec::encode(&transform, data)
    }

    /// Decrypt bytes produced by [`RsaCert::encode_data`].
    pub fn decode_data(&self, data: &[u8]) -> CertResult<Vec<u8>> {
        let transform = self.store.decrypt_transform()?;
        codec::decode(&transform, data)
    }

    /// UTF-8 encode `message`, then encrypt.
    pub fn encode_text(&self, message: &str) -> CertResult<Vec<u8>> {
        self.encode_data(message.as_bytes())
    }

    /// Decrypt, then UTF-8 decode. Invalid UTF-8 usually means the wrong
    /// private key was used and is reported as `TextDecode`.
    pub fn decode_text(&self, data: &[u8]) -> CertResult<String> {
        let plain = self.decode_data(data)?;
        let message = String::from_utf8(plain)?;
        debug!(chars = message.chars().count(), "decoded text");
        Ok(message)
    }

    /// Segment sizes for the key in `slot`.
    pub fn block_policy(&self, slot: KeySlot) -> CertResult<BlockPolicy> {
        let policy = match slot {
            KeySlot::Public => self.store.encrypt_transform()?.policy(),
            KeySlot::Private => self.store.decrypt_transform()?.policy(),
        };
        Ok(policy)
    }

    pub fn public_key(&self) -> Option<Arc<RsaPublicKey>> {
        self.store.public_key()
    }

    pub fn private_key(&self) -> Option<Arc<RsaPrivateKey>> {
        self.store.private_key()
    }

    pub fn store(&self) -> &KeyStore {
        &self.store
    }
}
