use super::{Cookie, CookieError, cookie_jar};

/// Abstraction for cookie storage backends.
///
/// Cookies are grouped by host key (see [cookie_jar::host_key]). Uses async methods so a
/// persistent backend can do I/O without blocking the exchange.
#[async_trait::async_trait]
pub trait CookieStore: Send + Sync {
    /// Returns the non-expired cookies stored for `host`, in insertion order.
    async fn cookies(&self, host: &str) -> Result<Vec<Cookie>, CookieError>;

    /// Merges parsed cookies into the jar of `host` following [cookie_jar::merge].
    async fn merge(&self, host: &str, cookies: Vec<Cookie>) -> Result<(), CookieError>;

    /// The `Cookie` header value for `host`, if any cookie is stored.
    async fn header_value(&self, host: &str) -> Result<Option<String>, CookieError> {
        Ok(cookie_jar::header_value(&self.cookies(host).await?))
    }
}
