use thiserror::Error;

use crate::types::KeySlot;

pub type CertResult<T> = Result<T, CertError>;

#[derive(Debug, Error)]
pub enum CertError {
    #[error("cannot generate {bits}-bit RSA keypair: {source}")]
    KeyGeneration {
        bits: usize,
        #[source]
        source: rsa::Error,
    },

    #[error("cannot parse RSA {slot} key: {source}")]
    KeyParse {
        slot: KeySlot,
        #[source]
        source: KeyFormatError,
    },

    #[error("cannot serialize RSA {slot} key: {source}")]
    KeySerialize {
        slot: KeySlot,
        #[source]
        source: KeyFormatError,
    },

    #[error("RSA {slot} key modulus is {modulus_bytes} bytes, too small for PKCS#1 v1.5 padding")]
    KeyTooSmall { slot: KeySlot, modulus_bytes: usize },

    #[error("no {slot} key loaded")]
    MissingKey { slot: KeySlot },

    #[error("encryption failed at segment {segment}: {source}")]
    Encode {
        segment: usize,
        #[source]
        source: rsa::Error,
    },

    #[error("decryption failed at segment {segment}: {source}")]
    Decode {
        segment: usize,
        #[source]
        source: DecodeFailure,
    },

    #[error("decrypted data is not valid UTF-8 (wrong private key?): {0}")]
    TextDecode(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Underlying encoder/decoder failure for a PKCS#8 or SubjectPublicKeyInfo key.
#[derive(Debug, Error)]
pub enum KeyFormatError {
    #[error("PKCS#8: {0}")]
    Pkcs8(#[from] rsa::pkcs8::Error),

    #[error("SubjectPublicKeyInfo: {0}")]
    Spki(#[from] rsa::pkcs8::spki::Error),

    #[error("PEM input is not UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
}

/// Why a single ciphertext segment could not be decrypted.
#[derive(Debug, Error)]
pub enum DecodeFailure {
    #[error("segment is {len} bytes, expected {expected}")]
    Truncated { len: usize, expected: usize },

    #[error(transparent)]
    Rsa(#[from] rsa::Error),
}

impl CertError {
    /// The key slot this error concerns, when there is one.
    pub fn slot(&self) -> Option<KeySlot> {
        match self {
            CertError::KeyParse { slot, .. }
            | CertError::KeySerialize { slot, .. }
            | CertError::KeyTooSmall { slot, .. }
            | CertError::MissingKey { slot } => Some(*slot),
            CertError::Encode { .. } => Some(KeySlot::Public),
            CertError::Decode { .. } | CertError::TextDecode(_) => Some(KeySlot::Private),
            CertError::KeyGeneration { .. } | CertError::Io(_) => None,
        }
    }
}
