use std::{collections::HashMap, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Desktop Chrome identification sent when a request does not set its own `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                      (KHTML, like Gecko) Chrome/75.0.3770.100 Safari/537.36";

/// Basic client behavior settings. These settings specify the two hosts the payment flow talks
/// to and where card data is cached. They are optional and uneditable once the client is
/// initialized.
///
/// Defaults to
///
/// ```
/// # use topup_core::ClientSettings;
/// let settings = ClientSettings::default();
/// assert_eq!(settings.merchant_url, "https://www.portmone.com.ua");
/// assert_eq!(settings.bank_url, "https://acs.privatbank.ua");
/// assert_eq!(settings.shop_site_id, 6044);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientSettings {
    /// Base url of the merchant gateway.
    pub merchant_url: String,
    /// Base url of the card issuer 3-D Secure gateway.
    pub bank_url: String,
    /// The user agent sent unless a request overrides it.
    pub user_agent: String,
    /// Directory holding encrypted card blobs.
    pub cache_dir: PathBuf,
    /// Locations the bank-side coordinates are drawn from.
    pub locations: Vec<Location>,
    /// Raw `Set-Cookie` lines per host used to seed the jar.
    pub cookies: HashMap<String, Vec<String>>,
    /// Merchant payee template.
    pub payee: Payee,
    /// Merchant shop identifier.
    pub shop_site_id: u32,
    /// Merchant page language.
    pub lang: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            merchant_url: "https://www.portmone.com.ua".into(),
            bank_url: "https://acs.privatbank.ua".into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            cache_dir: PathBuf::from("./data/cache"),
            locations: vec![Location {
                name: "Kyiv".into(),
                lat: 50.4501,
                lng: 30.5234,
            }],
            cookies: HashMap::new(),
            payee: Payee::default(),
            shop_site_id: 6044,
            lang: "uk".into(),
        }
    }
}

/// A named point reported to the bank as the payer's position.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Location {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub lat: f64,
    #[allow(missing_docs)]
    pub lng: f64,
}

/// Identifies the mobile operator account on the merchant side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Payee {
    #[allow(missing_docs)]
    pub payee_id: String,
    #[allow(missing_docs)]
    pub attribute1: String,
    /// Response format requested from the merchant.
    pub format: String,
}

impl Default for Payee {
    fn default() -> Self {
        Self {
            payee_id: "KYIVSTAR_P".into(),
            attribute1: "P".into(),
            format: "json".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: ClientSettings = serde_json::from_str(
            r#"{
                "bankUrl": "http://127.0.0.1:9000",
                "locations": [{"name": "Lviv", "lat": 49.84, "lng": 24.03}],
                "cookies": {"acs.privatbank.ua": ["JSESSIONID=abc; path=/"]}
            }"#,
        )
        .unwrap();

        assert_eq!(settings.merchant_url, "https://www.portmone.com.ua");
        assert_eq!(settings.bank_url, "http://127.0.0.1:9000");
        assert_eq!(settings.locations[0].name, "Lviv");
        assert_eq!(settings.cookies["acs.privatbank.ua"].len(), 1);
        assert_eq!(settings.payee, Payee::default());
        assert_eq!(settings.lang, "uk");
    }
}
