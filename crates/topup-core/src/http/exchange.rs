use std::{fmt::Display, sync::Arc};

use http::{HeaderMap, HeaderName, HeaderValue, Method, header};
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use url::{Url, form_urlencoded};

use super::{ACCEPT_ENCODING, CookieMiddleware, CookieStore, Response, response::{decode_body, decode_text}};
use crate::ExchangeError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Encodes form values as `application/x-www-form-urlencoded`.
pub fn encode_form<I, K, V>(values: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in values {
        serializer.append_pair(key.as_ref(), &value.to_string());
    }
    serializer.finish()
}

/// A single HTTP call waiting to be sent.
#[derive(Debug, Clone)]
pub struct Exchange {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl Exchange {
    #[allow(missing_docs)]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// A `GET` request.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// A form-encoded `POST`.
    pub fn post_form<I, K, V>(url: Url, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        Self::new(Method::POST, url)
            .header(header::CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
            .body(encode_form(values))
    }

    /// A JSON `POST`.
    pub fn post_json<T: Serialize + ?Sized>(url: Url, value: &T) -> Result<Self, ExchangeError> {
        Ok(Self::new(Method::POST, url)
            .header(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .body(serde_json::to_string(value)?))
    }

    /// Marks the request as issued by page script.
    pub fn xhr(self) -> Self {
        self.header(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        )
    }

    /// Sets a header, replacing any previous value.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets a raw body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[allow(missing_docs)]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Browser-like HTTP client with a per host cookie jar.
///
/// Responses are always buffered and decoded (see [Response]) before they are returned, and a
/// status of 400 or above is turned into [ExchangeError::Status]. Redirects are not followed so
/// every `Set-Cookie` passes through the jar. There are no retries.
#[derive(Clone)]
pub struct ExchangeClient {
    http: ClientWithMiddleware,
    cookie_store: Arc<dyn CookieStore>,
    user_agent: HeaderValue,
}

impl std::fmt::Debug for ExchangeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeClient")
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl ExchangeClient {
    /// Builds the client around `cookie_store`, sending `user_agent` unless a request sets its
    /// own.
    pub fn new(
        cookie_store: Arc<dyn CookieStore>,
        user_agent: &str,
    ) -> Result<Self, ExchangeError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        let http = reqwest_middleware::ClientBuilder::new(http)
            .with(CookieMiddleware::new(cookie_store.clone()))
            .build();

        Ok(Self {
            http,
            cookie_store,
            user_agent: HeaderValue::from_str(user_agent)?,
        })
    }

    /// The jar backing this client.
    pub fn cookie_store(&self) -> &Arc<dyn CookieStore> {
        &self.cookie_store
    }

    #[allow(missing_docs)]
    pub async fn get(&self, url: Url) -> Result<Response, ExchangeError> {
        self.send(Exchange::get(url)).await
    }

    /// Form-encoded `POST`.
    pub async fn post<I, K, V>(&self, url: Url, values: I) -> Result<Response, ExchangeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        self.send(Exchange::post_form(url, values)).await
    }

    /// Form-encoded `POST` with `X-Requested-With: XMLHttpRequest`.
    pub async fn post_xhr<I, K, V>(&self, url: Url, values: I) -> Result<Response, ExchangeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        self.send(Exchange::post_form(url, values).xhr()).await
    }

    #[allow(missing_docs)]
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: Url,
        value: &T,
    ) -> Result<Response, ExchangeError> {
        self.send(Exchange::post_json(url, value)?).await
    }

    /// Sends a prepared exchange and decodes the response.
    pub async fn send(&self, exchange: Exchange) -> Result<Response, ExchangeError> {
        let Exchange {
            method,
            url,
            mut headers,
            body,
        } = exchange;

        if !headers.contains_key(header::USER_AGENT) {
            headers.insert(header::USER_AGENT, self.user_agent.clone());
        }
        headers.insert(
            header::ACCEPT_ENCODING,
            HeaderValue::from_static(ACCEPT_ENCODING),
        );

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(body) = &body {
            headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
            request = request.body(body.clone());
        }

        let response = request.headers(headers).send().await?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let raw = response.bytes().await?;

        tracing::debug!(%method, %url, status = status.as_u16(), bytes = raw.len(), "exchange");

        if status.as_u16() > 399 {
            return Err(ExchangeError::Status {
                status,
                message: status.canonical_reason().unwrap_or_default().to_string(),
                url,
                request_body: body,
                body: decode_text(&response_headers, &raw),
                headers: response_headers,
            });
        }

        Ok(Response {
            url,
            status,
            body: decode_body(&response_headers, &raw),
            headers: response_headers,
            request_body: body,
        })
    }
}
