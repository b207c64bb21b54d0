//! rsacert-crypto: chunked RSA encryption of arbitrary-length payloads
//!
//! Architecture: Segment-then-Encrypt with RSA PKCS#1 v1.5
//!
//! Pipeline: plaintext → split into (modulus - 11)-byte segments → RSA encrypt each → concatenate
//!
//! Key lifecycle:
//! ```text
//! generate_keypair / load_key ──► KeyStore (public slot, private slot)
//!                                   │  set() invalidates that slot's transform
//!                                   ▼
//!                                 TransformCache (Uninitialized | Ready(Arc<transform>))
//!                                   │
//!                                   ▼
//!                                 codec::encode / codec::decode
//! ```
//!
//! Ciphertext layout for a key with an N-byte modulus:
//! ```text
//! [N bytes: segment 0][N bytes: segment 1]...[N bytes: segment k-1]
//! k = ceil(plaintext_len / (N - 11)), empty plaintext → empty ciphertext
//! ```

pub mod block;
pub mod cache;
pub mod cert;
pub mod codec;
pub mod io;
pub mod keys;
pub mod store;
pub mod transform;

pub use block::BlockPolicy;
pub use cache::TransformCache;
pub use cert::RsaCert;
pub use codec::{decode, encode};
pub use keys::{generate_keypair, load_key, serialize_key, Key, KeyPair};
pub use store::KeyStore;
pub use transform::{BlockTransform, DecryptTransform, EncryptTransform};

pub use rsacert_core::{CertError, CertResult, KeyEncoding, KeySlot};

/// Bytes of every PKCS#1 v1.5 encryption block consumed by padding
pub const PKCS1_V15_OVERHEAD: usize = 11;

/// Smallest modulus accepted for key generation
pub const MIN_KEY_BITS: usize = 512;

/// Largest modulus accepted for key generation (the `rsa` crate refuses
/// to decode public keys above this size)
pub const MAX_KEY_BITS: usize = 4096;
