use hmac::Hmac;
use md5::{Digest, Md5};
use rand::{Rng, seq::SliceRandom};
use sha2::Sha512;

use crate::{CryptoError, Result};

const PBKDF_KEY_SIZE: usize = 32;

const SPECIAL_CHARS: &[u8] = b"!#$%&()*,.:;@[]^~+}";
const DIGIT_CHARS: &[u8] = b"0123456789";
const UPPERCASE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Derive a 256 bit key with PBKDF2-HMAC-SHA512
pub fn pbkdf2_sha512(password: &[u8], salt: &[u8], rounds: u32) -> [u8; PBKDF_KEY_SIZE] {
    pbkdf2::pbkdf2_array::<Hmac<Sha512>, PBKDF_KEY_SIZE>(password, salt, rounds)
        .expect("hash is a valid fixed size")
}

/// Lowercase hex MD5 digest of `data`.
///
/// Only used as a content address and correlation token, never to protect secrets.
pub fn md5_hex(data: impl AsRef<[u8]>) -> String {
    hex::encode(Md5::digest(data.as_ref()))
}

/// Character classes a generated password is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCharset {
    /// `a-z`
    pub lowercase: bool,
    /// `A-Z`
    pub uppercase: bool,
    /// `0-9`
    pub numbers: bool,
    /// `!#$%&()*,.:;@[]^~+}`
    pub special: bool,
}

impl Default for PasswordCharset {
    fn default() -> Self {
        Self {
            lowercase: true,
            uppercase: true,
            numbers: true,
            special: true,
        }
    }
}

impl PasswordCharset {
    fn alphabet(&self) -> Vec<u8> {
        let mut alphabet = Vec::new();
        if self.special {
            alphabet.extend_from_slice(SPECIAL_CHARS);
        }
        if self.numbers {
            alphabet.extend_from_slice(DIGIT_CHARS);
        }
        if self.uppercase {
            alphabet.extend_from_slice(UPPERCASE_CHARS);
        }
        if self.lowercase {
            alphabet.extend_from_slice(LOWERCASE_CHARS);
        }
        alphabet
    }
}

/// Generate a random password of `length` characters drawn uniformly from `charset`.
pub fn generate_password(length: usize, charset: PasswordCharset) -> Result<String> {
    generate_password_internal(&mut rand::thread_rng(), length, charset)
}

fn generate_password_internal(
    rng: &mut impl Rng,
    length: usize,
    charset: PasswordCharset,
) -> Result<String> {
    let alphabet = charset.alphabet();
    if alphabet.is_empty() {
        return Err(CryptoError::EmptyCharset);
    }

    Ok((0..length)
        .filter_map(|_| alphabet.choose(rng).map(|c| *c as char))
        .collect())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_md5_hex() {
        assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex("1571400000000"), md5_hex(b"1571400000000"));
        assert_eq!(md5_hex("abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_pbkdf2_sha512_is_deterministic() {
        let a = pbkdf2_sha512(b"password", b"salt", 10);
        let b = pbkdf2_sha512(b"password", b"salt", 10);
        let c = pbkdf2_sha512(b"password", b"pepper", 10);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_password_respects_charset() {
        let mut rng = rand_chacha::ChaCha8Rng::from_seed([1u8; 32]);
        let charset = PasswordCharset {
            lowercase: false,
            uppercase: false,
            numbers: true,
            special: false,
        };
        let password = generate_password_internal(&mut rng, 64, charset).unwrap();

        assert_eq!(password.len(), 64);
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_password_default_len() {
        let password = generate_password(32, PasswordCharset::default()).unwrap();
        assert_eq!(password.chars().count(), 32);
    }

    #[test]
    fn test_generate_password_empty_charset() {
        let charset = PasswordCharset {
            lowercase: false,
            uppercase: false,
            numbers: false,
            special: false,
        };
        assert!(matches!(
            generate_password(8, charset),
            Err(CryptoError::EmptyCharset)
        ));
    }
}
