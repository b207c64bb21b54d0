//! Segment sizing derived from the modulus length.

use rsacert_core::{CertError, CertResult, KeySlot};

use crate::PKCS1_V15_OVERHEAD;

/// Plaintext/ciphertext segment sizes for one RSA modulus.
///
/// Encryption consumes at most `plaintext` bytes per segment and always emits
/// exactly `ciphertext` bytes; decryption walks the ciphertext in `ciphertext`
/// strides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPolicy {
    plaintext: usize,
    ciphertext: usize,
}

impl BlockPolicy {
    /// Policy for a modulus of `modulus_bytes` bytes.
    ///
    /// Fails with `KeyTooSmall` when the modulus cannot hold a single padded
    /// plaintext byte.
    pub fn for_modulus(slot: KeySlot, modulus_bytes: usize) -> CertResult<Self> {
        if modulus_bytes <= PKCS1_V15_OVERHEAD {
            return Err(CertError::KeyTooSmall {
                slot,
                modulus_bytes,
            });
        }
        Ok(Self {
            plaintext: modulus_bytes - PKCS1_V15_OVERHEAD,
            ciphertext: modulus_bytes,
        })
    }

    pub fn plaintext_block_size(&self) -> usize {
        self.plaintext
    }

    pub fn ciphertext_block_size(&self) -> usize {
        self.ciphertext
    }

    /// Number of segments a plaintext of `len` bytes is split into.
    pub fn segments_for_plaintext(&self, len: usize) -> usize {
        len.div_ceil(self.plaintext)
    }

    /// Exact ciphertext length for a plaintext of `len` bytes.
    pub fn ciphertext_len(&self, len: usize) -> usize {
        self.segments_for_plaintext(len) * self.ciphertext
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_1024_bit_policy() {
        let policy = BlockPolicy::for_modulus(KeySlot::Public, 128).unwrap();
        assert_eq!(policy.plaintext_block_size(), 117);
        assert_eq!(policy.ciphertext_block_size(), 128);
        assert!(policy.plaintext_block_size() < policy.ciphertext_block_size());
    }

    #[test]
    fn test_segment_counts() {
        let policy = BlockPolicy::for_modulus(KeySlot::Public, 128).unwrap();
        assert_eq!(policy.segments_for_plaintext(0), 0);
        assert_eq!(policy.segments_for_plaintext(1), 1);
        assert_eq!(policy.segments_for_plaintext(117), 1);
        assert_eq!(policy.segments_for_plaintext(118), 2);
        assert_eq!(policy.ciphertext_len(118), 256);
        assert_eq!(policy.ciphertext_len(0), 0);
    }

    #[test]
    fn test_modulus_too_small() {
        let err = BlockPolicy::for_modulus(KeySlot::Private, 11).unwrap_err();
        assert!(matches!(
            err,
            CertError::KeyTooSmall {
                slot: KeySlot::Private,
                modulus_bytes: 11
            }
        ));
        assert!(BlockPolicy::for_modulus(KeySlot::Public, 12).is_ok());
    }
}
