use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which half of an RSA keypair an operation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySlot {
    /// Encrypting half: modulus + public exponent (X.509 SubjectPublicKeyInfo)
    Public,
    /// Decrypting half: full private key with CRT parameters (PKCS#8)
    Private,
}

impl KeySlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySlot::Public => "public",
            KeySlot::Private => "private",
        }
    }
}

impl fmt::Display for KeySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeySlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" | "pub" => Ok(KeySlot::Public),
            "private" | "priv" => Ok(KeySlot::Private),
            other => Err(format!("unknown key slot '{other}' (expected public or private)")),
        }
    }
}

/// On-disk representation of an encoded key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEncoding {
    /// Raw ASN.1 DER bytes, no framing
    #[default]
    Der,
    /// RFC 7468 PEM armor around the same DER structure
    Pem,
}

impl fmt::Display for KeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEncoding::Der => f.write_str("der"),
            KeyEncoding::Pem => f.write_str("pem"),
        }
    }
}

impl FromStr for KeyEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "der" => Ok(KeyEncoding::Der),
            "pem" => Ok(KeyEncoding::Pem),
            other => Err(format!("unknown key encoding '{other}' (expected der or pem)")),
        }
    }
}
