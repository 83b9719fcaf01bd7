use std::path::PathBuf;

use topup_core::Client;
use topup_crypto::{PasswordCharset, generate_password};

use crate::{CacheStore, CardError, CardRecord, CardSource, open_card, seal_card};

const AUTH_KEY_LENGTH: usize = 32;

/// Result of [CardClient::encode].
#[derive(Debug, Clone)]
pub struct EncodedCard {
    /// The secret needed to load the card again.
    pub auth_key: String,
    /// Where the blob was written, `None` if writing failed.
    pub path: Option<PathBuf>,
}

#[allow(missing_docs)]
pub struct CardClient {
    client: Client,
}

impl CardClient {
    fn new(client: Client) -> Self {
        Self { client }
    }

    fn cache(&self) -> CacheStore {
        CacheStore::new(&self.client.settings().cache_dir)
    }

    /// Seals `card` under a fresh auth key and stores it in the cache directory.
    ///
    /// A failed write is logged and the auth key is still returned.
    pub async fn encode(&self, card: &CardRecord) -> Result<EncodedCard, CardError> {
        let auth_key = generate_password(AUTH_KEY_LENGTH, PasswordCharset::default())?;
        let blob = seal_card(card, &auth_key)?;

        let path = match self.cache().write(&auth_key, &blob).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), bytes = blob.len(), "Saved card data");
                Some(path)
            }
            Err(e) => {
                tracing::warn!("Failed to save card data: {e}");
                None
            }
        };

        Ok(EncodedCard { auth_key, path })
    }

    /// Loads the card stored under `auth_key`.
    ///
    /// Every failure is reported as [CardError::CannotLoad]; the cause is logged.
    pub async fn decode(&self, auth_key: &str) -> Result<CardRecord, CardError> {
        if auth_key.is_empty() {
            return Err(CardError::MissingAuthKey);
        }

        let blob = self.cache().read(auth_key).await.map_err(|e| {
            tracing::error!("Failed to read card data: {e}");
            CardError::CannotLoad
        })?;

        open_card(&blob, auth_key).map_err(|e| {
            tracing::error!("Failed to open card data: {e}");
            CardError::CannotLoad
        })
    }

    /// Returns the card itself, or loads it for an auth key.
    pub async fn resolve(&self, source: CardSource) -> Result<CardRecord, CardError> {
        match source {
            CardSource::Card(card) => Ok(card.with_mask()),
            CardSource::AuthKey(auth_key) => self.decode(&auth_key).await,
        }
    }
}

#[allow(missing_docs)]
pub trait CardClientExt {
    fn cards(&self) -> CardClient;
}

impl CardClientExt for Client {
    fn cards(&self) -> CardClient {
        CardClient::new(self.clone())
    }
}
