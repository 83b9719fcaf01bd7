use std::borrow::Cow;

use http::{HeaderMap, StatusCode, header};
use serde_json::Value;
use url::Url;

use super::ContentEncoding;

/// A fully decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Decompressed, UTF-8 normalized text.
    Text(String),
    /// Parsed `application/json` payload.
    Json(Value),
}

impl Body {
    /// The body as text, JSON payloads are serialized back.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Body::Text(text) => Cow::Borrowed(text),
            Body::Json(value) => Cow::Owned(value.to_string()),
        }
    }

    /// The parsed JSON payload, if the body was JSON.
    pub fn json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Text(_) => None,
        }
    }

    /// Looks up a dotted path such as `response.form` in a JSON body.
    pub fn field(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(self.json()?, |value, key| value.get(key))
    }

    /// Like [Body::field] but only for string values.
    pub fn field_str(&self, path: &str) -> Option<&str> {
        self.field(path).and_then(Value::as_str)
    }
}

/// The outcome of one exchange with a status below 400.
#[derive(Debug, Clone)]
pub struct Response {
    /// Url the request was sent to.
    pub url: Url,
    #[allow(missing_docs)]
    pub status: StatusCode,
    #[allow(missing_docs)]
    pub headers: HeaderMap,
    #[allow(missing_docs)]
    pub body: Body,
    /// Encoded request body, kept for diagnostics.
    pub request_body: Option<String>,
}

impl Response {
    /// Raw `Set-Cookie` lines of this response.
    pub fn set_cookie_lines(&self) -> Vec<&str> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }

    /// Shortcut for [Body::text].
    pub fn text(&self) -> Cow<'_, str> {
        self.body.text()
    }
}

/// What the response headers (and, failing that, the body) say about the payload.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ContentInfo {
    pub mime: String,
    pub charset: Option<String>,
    pub encoding: Option<ContentEncoding>,
}

impl ContentInfo {
    pub(crate) fn new(headers: &HeaderMap, body: &[u8]) -> Self {
        let mut info = ContentInfo::default();

        if let Some(content_type) = header_str(headers, header::CONTENT_TYPE) {
            let mut params = content_type.split(';');
            info.mime = params.next().unwrap_or_default().trim().to_lowercase();

            for param in params {
                if let Some((key, value)) = param.split_once('=') {
                    if key.trim().eq_ignore_ascii_case("charset") {
                        let value = value.trim().trim_matches(&['"', '\''][..]).to_lowercase();
                        info.charset = Some(value);
                    }
                }
            }
        }

        info.encoding = match header_str(headers, header::CONTENT_ENCODING) {
            Some(value) => ContentEncoding::from_header(value),
            None => ContentEncoding::sniff(body),
        };

        info
    }

    fn is_utf8(&self) -> bool {
        matches!(self.charset.as_deref(), None | Some("" | "utf8" | "utf-8"))
    }
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Decompresses, transcodes and, for JSON, parses a raw body.
///
/// Every step degrades instead of failing: an undecodable compressed body is passed through as
/// is, an unknown charset falls back to lossy UTF-8 and malformed JSON stays text.
pub(crate) fn decode_body(headers: &HeaderMap, raw: &[u8]) -> Body {
    let info = ContentInfo::new(headers, raw);
    let text = decode_with(&info, raw);

    if info.mime == "application/json" {
        match serde_json::from_str(&text) {
            Ok(value) => return Body::Json(value),
            Err(e) => tracing::warn!("Failed to parse JSON response body: {e}"),
        }
    }

    Body::Text(text)
}

/// Decompresses and transcodes a raw body without interpreting it, whatever its content type.
pub(crate) fn decode_text(headers: &HeaderMap, raw: &[u8]) -> String {
    decode_with(&ContentInfo::new(headers, raw), raw)
}

fn decode_with(info: &ContentInfo, raw: &[u8]) -> String {
    let bytes = match info.encoding {
        Some(encoding) => match encoding.decode(raw) {
            Ok(decoded) => Cow::Owned(decoded),
            Err(e) => {
                tracing::warn!(?encoding, "Failed to decompress response body: {e}");
                Cow::Borrowed(raw)
            }
        },
        None => Cow::Borrowed(raw),
    };

    match info.charset.as_deref() {
        Some(label) if !info.is_utf8() => match encoding_rs::Encoding::for_label(label.as_bytes())
        {
            Some(encoding) => encoding.decode(&bytes).0.into_owned(),
            None => {
                tracing::warn!(charset = label, "Unknown response charset");
                String::from_utf8_lossy(&bytes).into_owned()
            }
        },
        _ => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use http::HeaderValue;
    use serde_json::json;

    use super::*;

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        pairs
            .iter()
            .map(|(name, value)| (name.clone(), HeaderValue::from_static(value)))
            .collect()
    }

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_content_info_parses_type_and_charset() {
        let headers = headers(&[(
            header::CONTENT_TYPE,
            "Text/HTML; Charset=\"Windows-1251\"",
        )]);
        let info = ContentInfo::new(&headers, b"");

        assert_eq!(info.mime, "text/html");
        assert_eq!(info.charset.as_deref(), Some("windows-1251"));
        assert_eq!(info.encoding, None);
    }

    #[test]
    fn test_header_encoding_takes_precedence_over_sniffing() {
        let headers = headers(&[(header::CONTENT_ENCODING, "br")]);
        let info = ContentInfo::new(&headers, &[0x1F, 0x8B]);
        assert_eq!(info.encoding, Some(ContentEncoding::Brotli));
    }

    #[test]
    fn test_decode_sniffed_gzip() {
        let body = decode_body(&HeaderMap::new(), &gzip(b"<p>hi</p>"));
        assert_eq!(body, Body::Text("<p>hi</p>".to_string()));
    }

    #[test]
    fn test_decode_bad_stream_passes_through() {
        let headers = headers(&[(header::CONTENT_ENCODING, "gzip")]);
        let body = decode_body(&headers, b"not compressed");
        assert_eq!(body, Body::Text("not compressed".to_string()));
    }

    #[test]
    fn test_decode_windows_1251() {
        let headers = headers(&[(header::CONTENT_TYPE, "text/html; charset=windows-1251")]);
        // "Оплата" in cp1251
        let raw = [0xCE, 0xEF, 0xEB, 0xE0, 0xF2, 0xE0];
        assert_eq!(decode_body(&headers, &raw).text(), "Оплата");
    }

    #[test]
    fn test_decode_json_and_fields() {
        let headers = headers(&[(header::CONTENT_TYPE, "application/json; charset=utf-8")]);
        let body = decode_body(
            &headers,
            &gzip(br#"{"response":{"form":"<form id=\"apiForm\"></form>","n":1}}"#),
        );

        assert_eq!(
            body.json(),
            Some(&json!({"response": {"form": "<form id=\"apiForm\"></form>", "n": 1}}))
        );
        assert_eq!(
            body.field_str("response.form"),
            Some("<form id=\"apiForm\"></form>")
        );
        assert_eq!(body.field_str("response.n"), None);
        assert_eq!(body.field("response.missing"), None);
    }

    #[test]
    fn test_decode_malformed_json_stays_text() {
        let headers = headers(&[(header::CONTENT_TYPE, "application/json")]);
        let body = decode_body(&headers, b"{oops");
        assert_eq!(body, Body::Text("{oops".to_string()));
        assert_eq!(body.field("response"), None);
    }

    #[test]
    fn test_decode_text_leaves_json_untouched() {
        let headers = headers(&[(header::CONTENT_TYPE, "application/json; charset=utf-8")]);
        let raw = br#"{ "error" : "declined",  "code": 5 }"#;
        assert_eq!(decode_text(&headers, raw), r#"{ "error" : "declined",  "code": 5 }"#);
        assert_eq!(decode_text(&headers, &gzip(b"{oops")), "{oops");
    }
}
