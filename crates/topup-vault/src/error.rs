use thiserror::Error;

/// Errors raised while storing or loading card data.
#[derive(Debug, Error)]
pub enum CardError {
    /// Neither card fields nor an auth key were provided.
    #[error("No card data or auth key provided")]
    MissingAuthKey,

    /// Card fields are not 16, 3, 2 and 2 digits.
    #[error("Card number, CVV, month and year must be 16, 3, 2 and 2 digits")]
    InvalidCard,

    /// The blob for an auth key could not be read, opened or parsed. Details are only logged.
    #[error("Can't load credit card data")]
    CannotLoad,

    #[allow(missing_docs)]
    #[error(transparent)]
    Crypto(#[from] topup_crypto::CryptoError),

}
