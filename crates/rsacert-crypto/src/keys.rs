//! Key lifecycle: keypair generation, PKCS#8 / SubjectPublicKeyInfo load and serialize

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::{debug, info};
use zeroize::Zeroizing;

use rsacert_core::{CertError, CertResult, KeyEncoding, KeyFormatError, KeySlot};

use crate::{MAX_KEY_BITS, MIN_KEY_BITS};

/// One half of an RSA keypair, tagged with the slot it belongs in.
#[derive(Clone)]
pub enum Key {
    Public(RsaPublicKey),
    Private(RsaPrivateKey),
}

impl Key {
    pub fn slot(&self) -> KeySlot {
        match self {
            Key::Public(_) => KeySlot::Public,
            Key::Private(_) => KeySlot::Private,
        }
    }

    /// Bit length of the modulus.
    pub fn modulus_bits(&self) -> usize {
        match self {
            Key::Public(k) => k.n().bits(),
            Key::Private(k) => k.n().bits(),
        }
    }

    /// Byte length of the modulus (and of every ciphertext segment).
    pub fn modulus_bytes(&self) -> usize {
        match self {
            Key::Public(k) => k.size(),
            Key::Private(k) => k.size(),
        }
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Public(k) => f
                .debug_struct("Key::Public")
                .field("bits", &k.n().bits())
                .field("e", &k.e())
                .finish(),
            Key::Private(k) => f
                .debug_struct("Key::Private")
                .field("bits", &k.n().bits())
                .field("d", &"[REDACTED]")
                .finish(),
        }
    }
}

impl From<RsaPublicKey> for Key {
    fn from(key: RsaPublicKey) -> Self {
        Key::Public(key)
    }
}

impl From<RsaPrivateKey> for Key {
    fn from(key: RsaPrivateKey) -> Self {
        Key::Private(key)
    }
}

/// A freshly generated, matched keypair.
#[derive(Clone)]
pub struct KeyPair {
    pub public: RsaPublicKey,
    pub private: RsaPrivateKey,
}

impl KeyPair {
    pub fn into_keys(self) -> (Key, Key) {
        (Key::Public(self.public), Key::Private(self.private))
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("bits", &self.public.n().bits())
            .field("private", &"[REDACTED]")
            .finish()
    }
}

/// Generate a new RSA keypair of `bits` bits from the operating system CSPRNG.
pub fn generate_keypair(bits: usize) -> CertResult<KeyPair> {
    if bits < MIN_KEY_BITS {
        return Err(CertError::KeyGeneration {
            bits,
            source: rsa::Error::InvalidModulus,
        });
    }
    if bits > MAX_KEY_BITS {
        return Err(CertError::KeyGeneration {
            bits,
            source: rsa::Error::ModulusTooLarge,
        });
    }

    let private = RsaPrivateKey::new(&mut OsRng, bits)
        .map_err(|source| CertError::KeyGeneration { bits, source })?;
    let public = private.to_public_key();

    info!(bits, "generated RSA keypair");
    Ok(KeyPair { public, private })
}

/// Parse `bytes` as an encoded key for `slot`.
///
/// Private keys are PKCS#8 `PrivateKeyInfo`, public keys X.509
/// `SubjectPublicKeyInfo`. Handing one slot's encoding to the other slot is a
/// parse failure.
pub fn load_key(bytes: &[u8], slot: KeySlot, encoding: KeyEncoding) -> CertResult<Key> {
    let key = decode(bytes, slot, encoding).map_err(|source| CertError::KeyParse { slot, source })?;
    debug!(%slot, %encoding, bits = key.modulus_bits(), "loaded RSA key");
    Ok(key)
}

fn decode(bytes: &[u8], slot: KeySlot, encoding: KeyEncoding) -> Result<Key, KeyFormatError> {
    let key = match (slot, encoding) {
        (KeySlot::Private, KeyEncoding::Der) => Key::Private(RsaPrivateKey::from_pkcs8_der(bytes)?),
        (KeySlot::Private, KeyEncoding::Pem) => {
            Key::Private(RsaPrivateKey::from_pkcs8_pem(std::str::from_utf8(bytes)?)?)
        }
        (KeySlot::Public, KeyEncoding::Der) => Key::Public(RsaPublicKey::from_public_key_der(bytes)?),
        (KeySlot::Public, KeyEncoding::Pem) => {
            Key::Public(RsaPublicKey::from_public_key_pem(std::str::from_utf8(bytes)?)?)
        }
    };
    Ok(key)
}

/// Serialize `key` in its slot's standard encoding.
///
/// The returned buffer is wiped on drop; for private keys it holds the
/// private exponent and primes.
pub fn serialize_key(key: &Key, encoding: KeyEncoding) -> CertResult<Zeroizing<Vec<u8>>> {
    encode(key, encoding).map_err(|source| CertError::KeySerialize {
        slot: key.slot(),
        source,
    })
}

fn encode(key: &Key, encoding: KeyEncoding) -> Result<Zeroizing<Vec<u8>>, KeyFormatError> {
    let bytes = match (key, encoding) {
        (Key::Private(k), KeyEncoding::Der) => Zeroizing::new(k.to_pkcs8_der()?.as_bytes().to_vec()),
        (Key::Private(k), KeyEncoding::Pem) => {
            let pem = k.to_pkcs8_pem(LineEnding::LF)?;
            Zeroizing::new(pem.as_bytes().to_vec())
        }
        (Key::Public(k), KeyEncoding::Der) => Zeroizing::new(k.to_public_key_der()?.as_bytes().to_vec()),
        (Key::Public(k), KeyEncoding::Pem) => {
            Zeroizing::new(k.to_public_key_pem(LineEnding::LF)?.into_bytes())
        }
    };
    Ok(bytes)
}
