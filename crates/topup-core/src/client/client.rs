use std::sync::Arc;

use url::Url;

use super::client_settings::ClientSettings;
use crate::{
    ExchangeError,
    http::{CookieStore, ExchangeClient, InMemoryCookieStore, encode_form},
};

/// The main struct to interact with the merchant and bank hosts.
///
/// Cloning is cheap and every clone shares the same cookie jar. Feature crates attach to it
/// through extension traits (`client.cards()`, `client.payments()`).
#[derive(Debug, Clone)]
pub struct Client {
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

#[allow(missing_docs)]
#[derive(Debug)]
pub struct InternalClient {
    pub settings: ClientSettings,
    pub exchange: ExchangeClient,
}

impl Client {
    /// Create a new client with an in-memory cookie jar seeded from `settings.cookies`.
    pub fn new(settings: Option<ClientSettings>) -> Result<Self, ExchangeError> {
        let settings = settings.unwrap_or_default();
        let store = Arc::new(InMemoryCookieStore::with_set_cookie_lines(&settings.cookies));
        Self::new_with_cookie_store(Some(settings), store)
    }

    /// Create a new client on top of a caller provided cookie store.
    pub fn new_with_cookie_store(
        settings: Option<ClientSettings>,
        cookie_store: Arc<dyn CookieStore>,
    ) -> Result<Self, ExchangeError> {
        let settings = settings.unwrap_or_default();
        let exchange = ExchangeClient::new(cookie_store, &settings.user_agent)?;

        Ok(Self {
            internal: Arc::new(InternalClient { settings, exchange }),
        })
    }

    #[allow(missing_docs)]
    pub fn settings(&self) -> &ClientSettings {
        &self.internal.settings
    }

    #[allow(missing_docs)]
    pub fn exchange(&self) -> &ExchangeClient {
        &self.internal.exchange
    }

    /// Resolves `path` against the merchant base url, see [build_url].
    pub fn merchant_url(
        &self,
        path: &str,
        params: Option<&[(&str, String)]>,
    ) -> Result<Url, ExchangeError> {
        build_url(&self.internal.settings.merchant_url, path, params)
    }

    /// Resolves `path` against the bank base url, see [build_url].
    pub fn bank_url(
        &self,
        path: &str,
        params: Option<&[(&str, String)]>,
    ) -> Result<Url, ExchangeError> {
        build_url(&self.internal.settings.bank_url, path, params)
    }
}

/// Joins a path starting with `/` onto `base`, other values are taken as absolute urls. Query
/// parameters are form encoded and appended.
pub fn build_url(
    base: &str,
    path: &str,
    params: Option<&[(&str, String)]>,
) -> Result<Url, ExchangeError> {
    let mut url = if path.starts_with('/') {
        format!("{}{}", base.trim_end_matches('/'), path)
    } else {
        path.to_string()
    };

    if let Some(params) = params {
        url.push('?');
        url.push_str(&encode_form(params.iter().map(|(k, v)| (k, v))));
    }

    Url::parse(&url).map_err(|source| ExchangeError::InvalidUrl { url, source })
}
