//! Chunked codec: drives a block transform over an arbitrary-length buffer.
//!
//! Encryption splits the plaintext into `modulus - 11` byte segments (the last
//! one may be shorter); each segment becomes exactly one modulus-sized
//! ciphertext block. Decryption walks the ciphertext in modulus-sized strides.
//! Segments are processed and concatenated strictly in order, and the first
//! failing segment aborts the whole call.

use tracing::{debug, trace};

use rsacert_core::{CertError, CertResult, DecodeFailure};

use crate::transform::{BlockTransform, DecryptTransform, EncryptTransform};

/// Encrypt `plaintext` segment by segment.
///
/// Returns `ceil(len / P) * C` bytes, where `P`/`C` are the transform's
/// plaintext/ciphertext block sizes. Empty input yields empty output.
pub fn encode(transform: &EncryptTransform, plaintext: &[u8]) -> CertResult<Vec<u8>> {
    let policy = transform.policy();
    let mut output = Vec::with_capacity(policy.ciphertext_len(plaintext.len()));

    for_each_segment(transform, plaintext, |segment, block| {
        let encrypted = transform
            .apply(block)
            .map_err(|source| CertError::Encode { segment, source })?;
        output.extend_from_slice(&encrypted);
        Ok(())
    })?;

    debug!(
        plaintext = plaintext.len(),
        ciphertext = output.len(),
        segments = policy.segments_for_plaintext(plaintext.len()),
        "encoded"
    );
    Ok(output)
}

/// Decrypt `ciphertext` produced by [`encode`] with the matching public key.
///
/// A ciphertext whose length is not a whole number of blocks is rejected
/// before any block is decrypted.
pub fn decode(transform: &DecryptTransform, ciphertext: &[u8]) -> CertResult<Vec<u8>> {
    let policy = transform.policy();
    let block_size = policy.ciphertext_block_size();

    let trailing = ciphertext.len() % block_size;
    if trailing != 0 {
        return Err(CertError::Decode {
            segment: ciphertext.len() / block_size,
            source: DecodeFailure::Truncated {
                len: trailing,
                expected: block_size,
            },
        });
    }

    let segments = ciphertext.len() / block_size;
    let mut output = Vec::with_capacity(segments * policy.plaintext_block_size());

    for_each_segment(transform, ciphertext, |segment, block| {
        let decrypted = transform.apply(block).map_err(|source| CertError::Decode {
            segment,
            source: DecodeFailure::Rsa(source),
        })?;
        output.extend_from_slice(&decrypted);
        Ok(())
    })?;

    debug!(ciphertext = ciphertext.len(), plaintext = output.len(), segments, "decoded");
    Ok(output)
}

/// Feed `input` to `f` in order, `input_block_size()` bytes at a time.
fn for_each_segment<T, F>(transform: &T, input: &[u8], mut f: F) -> CertResult<()>
where
    T: BlockTransform,
    F: FnMut(usize, &[u8]) -> CertResult<()>,
{
    for (index, block) in input.chunks(transform.input_block_size()).enumerate() {
        trace!(segment = index, len = block.len(), "segment");
        f(index, block)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_keys::{keypair, other_keypair};
    use std::sync::Arc;

    fn transforms() -> (EncryptTransform, DecryptTransform) {
        let pair = keypair();
        (
            EncryptTransform::new(Arc::new(pair.public.clone())).unwrap(),
            DecryptTransform::new(Arc::new(pair.private.clone())).unwrap(),
        )
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 2)) as u8).collect()
    }

    #[test]
    fn test_empty_input() {
        let (enc, dec) = transforms();
        let ct = encode(&enc, b"").unwrap();
        assert!(ct.is_empty());
        assert!(decode(&dec, &ct).unwrap().is_empty());
    }

    #[test]
    fn test_roundtrip_around_block_boundaries() {
        let (enc, dec) = transforms();
        let p = enc.input_block_size();
        assert_eq!(p, 117);

        for len in [1, p - 1, p, p + 1, 2 * p, 3 * p + 5] {
            let msg = pattern(len);
            let ct = encode(&enc, &msg).unwrap();
            assert_eq!(decode(&dec, &ct).unwrap(), msg, "len={len}");
        }
    }

    #[test]
    fn test_segment_count_and_size() {
        let (enc, _) = transforms();
        for (len, segments) in [(0usize, 0usize), (1, 1), (117, 1), (118, 2), (351, 3), (352, 4)] {
            let ct = encode(&enc, &pattern(len)).unwrap();
            assert_eq!(ct.len(), segments * 128, "len={len}");
        }
    }

    #[test]
    fn test_encryption_is_randomized() {
        let (enc, dec) = transforms();
        let msg = pattern(200);
        let a = encode(&enc, &msg).unwrap();
        let b = encode(&enc, &msg).unwrap();
        assert_ne!(a, b, "PKCS#1 v1.5 padding must randomize ciphertext");
        assert_eq!(decode(&dec, &a).unwrap(), msg);
        assert_eq!(decode(&dec, &b).unwrap(), msg);
    }

    #[test]
    fn test_truncated_ciphertext_rejected() {
        let (enc, dec) = transforms();
        let mut ct = encode(&enc, &pattern(300)).unwrap();
        ct.truncate(ct.len() - 1);

        let err = decode(&dec, &ct).unwrap_err();
        assert!(matches!(
            err,
            CertError::Decode {
                segment: 2,
                source: DecodeFailure::Truncated {
                    len: 127,
                    expected: 128
                }
            }
        ));
    }

    #[test]
    fn test_corrupted_segment_aborts_with_index() {
        let (enc, dec) = transforms();
        let mut ct = encode(&enc, &pattern(300)).unwrap();
        // Corrupt the second block.
        ct[128 + 5] ^= 0xFF;

        match decode(&dec, &ct) {
            Err(CertError::Decode {
                segment,
                source: DecodeFailure::Rsa(_),
            }) => assert_eq!(segment, 1),
            // Padding can survive a bit flip by chance; it must still not round-trip.
            Ok(plain) => assert_ne!(plain, pattern(300)),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_private_key_fails() {
        let (enc, _) = transforms();
        let wrong = DecryptTransform::new(Arc::new(other_keypair().private.clone())).unwrap();
        let msg = pattern(50);
        let ct = encode(&enc, &msg).unwrap();

        match decode(&wrong, &ct) {
            Err(CertError::Decode { segment: 0, .. }) => {}
            Ok(plain) => assert_ne!(plain, msg),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
}
