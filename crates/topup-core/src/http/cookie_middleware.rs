use std::sync::Arc;

use http::{Extensions, header};
use reqwest::Request;
use reqwest_middleware::{Middleware, Next, Result};

use super::{CookieStore, cookie_jar};

/// Middleware that keeps a [CookieStore] in sync with every exchange.
///
/// Before the request leaves, the cookies stored for its host are sent as the `Cookie` header.
/// Once the response arrives, its `Set-Cookie` lines are parsed and merged back under the same
/// host.
pub struct CookieMiddleware {
    cookie_store: Arc<dyn CookieStore>,
}

impl CookieMiddleware {
    /// Creates a new cookie middleware with the specified store.
    pub fn new(cookie_store: Arc<dyn CookieStore>) -> Self {
        Self { cookie_store }
    }
}

#[async_trait::async_trait]
impl Middleware for CookieMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<reqwest::Response> {
        let host = cookie_jar::host_key(req.url());

        if let Some(host) = &host {
            match self.cookie_store.header_value(host).await {
                Ok(Some(value)) => match header::HeaderValue::from_str(&value) {
                    Ok(value) => {
                        req.headers_mut().insert(header::COOKIE, value);
                    }
                    Err(e) => tracing::warn!(%host, "Failed to build cookie header: {e}"),
                },
                Ok(None) => {}
                Err(e) => tracing::warn!(%host, "Failed to retrieve cookies from store: {e}"),
            }
        }

        let response = next.run(req, extensions).await?;

        if let Some(host) = host {
            let lines: Vec<&str> = response
                .headers()
                .get_all(header::SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .collect();

            if !lines.is_empty() {
                let cookies = cookie_jar::parse_set_cookie(lines);
                if let Err(e) = self.cookie_store.merge(&host, cookies).await {
                    tracing::warn!(%host, "Failed to store response cookies: {e}");
                }
            }
        }

        Ok(response)
    }
}
