use thiserror::Error;

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Error while decrypting sealed data")]
    Decrypt,
    #[error("Sealed data is too short, expected at least {expected} bytes but got {got}")]
    InvalidBlob { expected: usize, got: usize },

    #[error("Compression error, {0}")]
    Compression(#[source] std::io::Error),
    #[error("Invalid base64 input, {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Invalid key material")]
    InvalidKey,
    #[error("Signature error")]
    Signature,

    #[error("The selected password charset is empty")]
    EmptyCharset,
}

/// Alias for `Result<T, CryptoError>`.
pub type Result<T, E = CryptoError> = std::result::Result<T, E>;
