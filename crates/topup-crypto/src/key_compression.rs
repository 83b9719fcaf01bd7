//! Compact transport encoding for RSA keys.
//!
//! A PEM key is mostly framing and base64 padding. For out of band exchange the framing is
//! stripped, the body gzipped and the result base64 encoded. The receiving side reverses the
//! steps and puts the framing back.

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{Result, compression};

/// The kind of key being framed, which decides the PEM label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// SubjectPublicKeyInfo, `PUBLIC KEY`
    Spki,
    /// Encrypted PKCS#8 private key, `ENCRYPTED PRIVATE KEY`
    Pkcs8,
}

impl KeyKind {
    fn label(&self) -> &'static str {
        match self {
            KeyKind::Spki => "PUBLIC",
            KeyKind::Pkcs8 => "ENCRYPTED PRIVATE",
        }
    }

    /// Opening PEM line, including the trailing newline.
    pub fn open_tag(&self) -> String {
        format!("-----BEGIN {} KEY-----\n", self.label())
    }

    /// Closing PEM line, including the leading newline.
    pub fn close_tag(&self) -> String {
        format!("\n-----END {} KEY-----", self.label())
    }
}

/// Remove the first opening and the first closing PEM tag from `key`.
pub fn remove_tags(key: &str, kind: KeyKind) -> String {
    key.replacen(&kind.open_tag(), "", 1)
        .replacen(&kind.close_tag(), "", 1)
}

/// Put the PEM framing back around a key body.
///
/// Up to two trailing whitespace characters of the body are kept after the closing tag, so a
/// key that was framed as `...\n-----END PUBLIC KEY-----\n` comes back byte for byte.
pub fn append_tags(body: &str, kind: KeyKind) -> String {
    let trailing = body
        .chars()
        .rev()
        .take_while(|c| c.is_whitespace())
        .take(2)
        .map(char::len_utf8)
        .sum::<usize>();
    let (body, tail) = body.split_at(body.len() - trailing);

    format!("{}{}{}{}", kind.open_tag(), body, kind.close_tag(), tail)
}

/// Strip the framing of a PEM key, gzip it and encode it as base64.
pub fn encompress(key: &str, kind: KeyKind) -> Result<String> {
    let compressed = compression::gzip(remove_tags(key, kind).as_bytes())?;
    Ok(STANDARD.encode(compressed))
}

/// Reverse [encompress].
///
/// Returns `None` when the token is not valid base64 or does not hold a gzip stream, this path
/// only feeds an optional verification step so callers treat it as "no key".
pub fn decompress(token: &str, kind: KeyKind) -> Option<String> {
    let compressed = STANDARD.decode(token.trim()).ok()?;
    let body = compression::gunzip(&compressed).ok()?;
    let body = String::from_utf8(body).ok()?;

    Some(append_tags(&body, kind))
}
