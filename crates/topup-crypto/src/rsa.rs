//! RSA-SHA256 (PKCS#1 v1.5) signatures over an auth secret.
//!
//! The signed message is the passphrase when one is given, otherwise the private key text
//! itself. Verification re-signs with the private key and checks the result against the
//! public key, so a matching pair proves both halves belong together.

use base64::{Engine, engine::general_purpose::STANDARD};
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs1v15::{Signature, SigningKey, VerifyingKey},
    signature::{SignatureEncoding, Signer, Verifier},
};
use pkcs8::{DecodePrivateKey, DecodePublicKey};
use sha2::Sha256;

use crate::{CryptoError, Result};

fn load_private_key(private_key: &str, passphrase: Option<&str>) -> Result<RsaPrivateKey> {
    match passphrase {
        Some(passphrase) => {
            RsaPrivateKey::from_pkcs8_encrypted_pem(private_key, passphrase.as_bytes())
        }
        None => RsaPrivateKey::from_pkcs8_pem(private_key),
    }
    .map_err(|_| CryptoError::InvalidKey)
}

/// Sign with `private_key`, returning a base64 encoded signature.
pub fn sign(private_key: &str, passphrase: Option<&str>) -> Result<String> {
    let key = load_private_key(private_key, passphrase)?;
    let message = passphrase.unwrap_or(private_key);

    let signature = SigningKey::<Sha256>::new(key)
        .try_sign(message.as_bytes())
        .map_err(|_| CryptoError::Signature)?;

    Ok(STANDARD.encode(signature.to_bytes()))
}

/// Check that `public_key` verifies a signature made with `private_key`.
///
/// Any failure along the way (unreadable keys, wrong passphrase, mismatching pair) is reported
/// as `false`.
pub fn verify(private_key: &str, public_key: &str, passphrase: Option<&str>) -> bool {
    let Ok(signature) = sign(private_key, passphrase) else {
        return false;
    };
    let Ok(public_key) = RsaPublicKey::from_public_key_pem(public_key) else {
        return false;
    };
    let Ok(signature) = STANDARD
        .decode(signature)
        .map_err(|_| CryptoError::Signature)
        .and_then(|bytes| {
            Signature::try_from(bytes.as_slice()).map_err(|_| CryptoError::Signature)
        })
    else {
        return false;
    };

    let message = passphrase.unwrap_or(private_key);
    VerifyingKey::<Sha256>::new(public_key)
        .verify(message.as_bytes(), &signature)
        .is_ok()
}
