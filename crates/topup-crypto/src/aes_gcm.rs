//! # AES-256-GCM sealed blobs
//!
//! A sealed blob is a self contained byte string with the layout
//!
//! ```text
//! +---------------+--------------+---------------+------------------+
//! | salt (64)     | iv (16)      | tag (16)      | ciphertext (N)   |
//! +---------------+--------------+---------------+------------------+
//! ```
//!
//! The encryption key is derived from the caller supplied secret with PBKDF2-HMAC-SHA512 over
//! the random salt. Both salt and IV are generated per operation, so sealing the same plaintext
//! twice never produces the same blob.
//!
//! Note:
//! AES-256-GCM authenticates the ciphertext but does not provide key-commitment. A wrong secret
//! is detected through the tag mismatch only.

use aes_gcm::{
    AesGcm, KeyInit,
    aead::{AeadInPlace, consts::U16, generic_array::GenericArray},
    aes::Aes256,
};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::{CryptoError, Result, util::pbkdf2_sha512};

/// Length of the random salt prefixed to every sealed blob.
pub const SALT_SIZE: usize = 64;
/// Length of the GCM initialization vector.
pub const IV_SIZE: usize = 16;
/// Length of the GCM authentication tag.
pub const TAG_SIZE: usize = 16;

const HEADER_SIZE: usize = SALT_SIZE + IV_SIZE + TAG_SIZE;
const PBKDF2_ROUNDS: u32 = 2145;

/// AES-256-GCM with a 16 byte nonce, matching the persisted blob layout.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Encrypt `plaintext` with a key derived from `secret`.
pub fn seal(plaintext: &[u8], secret: &[u8]) -> Vec<u8> {
    seal_internal(rand::thread_rng(), plaintext, secret)
}

fn seal_internal(mut rng: impl RngCore + CryptoRng, plaintext: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut salt = [0u8; SALT_SIZE];
    let mut iv = [0u8; IV_SIZE];
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut iv);

    let key = Zeroizing::new(pbkdf2_sha512(secret, &salt, PBKDF2_ROUNDS));
    let mut buffer = plaintext.to_vec();
    let tag = Aes256Gcm16::new(GenericArray::from_slice(key.as_slice()))
        .encrypt_in_place_detached(GenericArray::from_slice(&iv), &[], &mut buffer)
        .expect("encryption failed");

    let mut sealed = Vec::with_capacity(HEADER_SIZE + buffer.len());
    sealed.extend_from_slice(&salt);
    sealed.extend_from_slice(&iv);
    sealed.extend_from_slice(&tag);
    sealed.extend_from_slice(&buffer);
    sealed
}

/// Decrypt a blob produced by [seal].
///
/// Fails with [CryptoError::Decrypt] when the secret is wrong or any byte of the blob was
/// modified.
pub fn open(sealed: &[u8], secret: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < HEADER_SIZE {
        return Err(CryptoError::InvalidBlob {
            expected: HEADER_SIZE,
            got: sealed.len(),
        });
    }

    let (salt, rest) = sealed.split_at(SALT_SIZE);
    let (iv, rest) = rest.split_at(IV_SIZE);
    let (tag, ciphertext) = rest.split_at(TAG_SIZE);

    let key = Zeroizing::new(pbkdf2_sha512(secret, salt, PBKDF2_ROUNDS));
    let mut buffer = ciphertext.to_vec();
    Aes256Gcm16::new(GenericArray::from_slice(key.as_slice()))
        .decrypt_in_place_detached(
            GenericArray::from_slice(iv),
            &[],
            &mut buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| CryptoError::Decrypt)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_seal_open() {
        let secret = b"7fK!pQ2#mZ9@xR4$wL8^tY6&vN3*hJ1(";
        let plaintext = b"My secret data";

        let sealed = seal(plaintext, secret);
        assert_eq!(sealed.len(), HEADER_SIZE + plaintext.len());

        let opened = open(&sealed, secret).unwrap();
        assert_eq!(plaintext, opened.as_slice());
    }

    #[test]
    fn test_seal_is_randomized() {
        let secret = b"secret";
        assert_ne!(seal(b"data", secret), seal(b"data", secret));
    }

    #[test]
    fn test_seal_deterministic_with_seeded_rng() {
        let rng = rand_chacha::ChaCha8Rng::from_seed([7u8; 32]);
        let a = seal_internal(rng, b"data", b"secret");
        let rng = rand_chacha::ChaCha8Rng::from_seed([7u8; 32]);
        let b = seal_internal(rng, b"data", b"secret");
        assert_eq!(a, b);
    }

    #[test]
    fn test_open_fails_with_wrong_secret() {
        let sealed = seal(b"My secret data", b"secret one");
        let result = open(&sealed, b"secret two");
        assert!(matches!(result, Err(CryptoError::Decrypt)));
    }

    #[test]
    fn test_open_fails_when_ciphertext_changed() {
        let mut sealed = seal(b"My secret data", b"secret");
        let last = sealed.len() - 1;
        sealed[last] = sealed[last].wrapping_add(1);
        assert!(matches!(open(&sealed, b"secret"), Err(CryptoError::Decrypt)));
    }

    #[test]
    fn test_open_fails_when_tag_changed() {
        let mut sealed = seal(b"My secret data", b"secret");
        sealed[SALT_SIZE + IV_SIZE] ^= 0x01;
        assert!(matches!(open(&sealed, b"secret"), Err(CryptoError::Decrypt)));
    }

    #[test]
    fn test_open_rejects_truncated_blob() {
        let result = open(&[0u8; HEADER_SIZE - 1], b"secret");
        assert!(matches!(
            result,
            Err(CryptoError::InvalidBlob {
                expected: HEADER_SIZE,
                got: 95
            })
        ));
    }
}
