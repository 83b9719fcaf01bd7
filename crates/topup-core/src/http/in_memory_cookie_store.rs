use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{Cookie, CookieError, CookieStore, cookie_jar};

/// In-memory cookie storage using HashMap with RwLock for thread-safe access.
///
/// Lives as long as the owning client; nothing is persisted.
#[derive(Default)]
pub struct InMemoryCookieStore {
    jars: RwLock<HashMap<String, Vec<Cookie>>>,
}

impl InMemoryCookieStore {
    /// Creates a new empty in-memory cookie store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with raw `Set-Cookie` lines per host.
    pub fn with_set_cookie_lines<'a, I>(seed: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Vec<String>)>,
    {
        let jars = seed
            .into_iter()
            .map(|(host, lines)| {
                (
                    cookie_jar::normalize_host(host),
                    cookie_jar::parse_set_cookie(lines),
                )
            })
            .filter(|(_, cookies)| !cookies.is_empty())
            .collect();

        Self {
            jars: RwLock::new(jars),
        }
    }
}

#[async_trait::async_trait]
impl CookieStore for InMemoryCookieStore {
    async fn cookies(&self, host: &str) -> Result<Vec<Cookie>, CookieError> {
        let jars = self.jars.read().await;
        Ok(jars
            .get(host)
            .map(|jar| jar.iter().filter(|c| !c.is_expired()).cloned().collect())
            .unwrap_or_default())
    }

    async fn merge(&self, host: &str, cookies: Vec<Cookie>) -> Result<(), CookieError> {
        if cookies.is_empty() {
            return Ok(());
        }

        let mut jars = self.jars.write().await;
        cookie_jar::merge(jars.entry(host.to_string()).or_default(), cookies);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_merge_and_get_cookies() {
        let store = InMemoryCookieStore::new();
        store
            .merge("example.com", vec![Cookie::new("session", "token123")])
            .await
            .unwrap();

        let cookies = store.cookies("example.com").await.unwrap();
        assert_eq!(cookies, vec![Cookie::new("session", "token123")]);
        assert!(store.cookies("other.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_hosts_are_isolated() {
        let store = InMemoryCookieStore::new();
        store
            .merge("merchant.test", vec![Cookie::new("a", "1")])
            .await
            .unwrap();
        store
            .merge("bank.test", vec![Cookie::new("a", "2")])
            .await
            .unwrap();

        assert_eq!(
            store.header_value("merchant.test").await.unwrap().as_deref(),
            Some("a=1")
        );
        assert_eq!(
            store.header_value("bank.test").await.unwrap().as_deref(),
            Some("a=2")
        );
    }

    #[tokio::test]
    async fn test_seeded_store_normalizes_hosts() {
        let seed = HashMap::from([(
            "www.portmone.com.ua".to_string(),
            vec!["PHPSESSID=abc; path=/".to_string()],
        )]);
        let store = InMemoryCookieStore::with_set_cookie_lines(&seed);

        assert_eq!(
            store.header_value("portmone.com.ua").await.unwrap().as_deref(),
            Some("PHPSESSID=abc")
        );
    }
}
