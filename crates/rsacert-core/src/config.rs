use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{KeyEncoding, KeySlot};

/// Default RSA modulus size in bits.
pub const DEFAULT_KEY_BITS: usize = 1024;

/// Top-level configuration (loaded from rsacert.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CertConfig {
    pub keys: KeysConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Modulus size for newly generated keypairs (default: 1024)
    pub bits: usize,
    /// Encoding of key files: "der" or "pem" (default: der)
    pub encoding: KeyEncoding,
    /// Public key file (SubjectPublicKeyInfo)
    pub public_key: Option<PathBuf>,
    /// Private key file (PKCS#8)
    pub private_key: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: warn)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl KeysConfig {
    /// Configured key file for `slot`, if any.
    pub fn path(&self, slot: KeySlot) -> Option<&PathBuf> {
        match slot {
            KeySlot::Public => self.public_key.as_ref(),
            KeySlot::Private => self.private_key.as_ref(),
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_KEY_BITS,
            encoding: KeyEncoding::Der,
            public_key: None,
            private_key: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}
