use chrono::{DateTime, NaiveDateTime, Utc};

use super::CookieError;

/// A single cookie as received in a `Set-Cookie` header.
#[derive(Clone, Debug, PartialEq)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Cookie domain
    pub domain: Option<String>,
    /// Cookie path
    pub path: Option<String>,
    /// Cookie expiration timestamp
    pub expires: Option<DateTime<Utc>>,
    /// Secure attribute (HTTPS-only)
    pub secure: bool,
    /// HttpOnly attribute
    pub http_only: bool,
}

impl Cookie {
    /// Creates a session cookie without attributes.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            expires: None,
            secure: false,
            http_only: false,
        }
    }

    /// Parses one `Set-Cookie` line.
    ///
    /// The first `;` separated segment is `name=value`, the remaining segments are attributes
    /// with case insensitive keys. An `expires` value that cannot be read is treated as absent.
    pub fn parse(line: &str) -> Result<Self, CookieError> {
        let mut segments = line.split(';');

        let pair = segments.next().unwrap_or_default().trim();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| CookieError::InvalidCookie(pair.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CookieError::InvalidCookie(pair.to_string()));
        }

        let mut cookie = Cookie::new(name, value.trim());

        for attribute in segments {
            let (key, value) = match attribute.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (attribute.trim(), None),
            };

            match key.to_ascii_lowercase().as_str() {
                "expires" => cookie.expires = value.and_then(parse_expires),
                "domain" => cookie.domain = value.map(str::to_string),
                "path" => cookie.path = value.map(str::to_string),
                "secure" => cookie.secure = true,
                "httponly" => cookie.http_only = true,
                _ => {}
            }
        }

        Ok(cookie)
    }

    /// Returns true if the cookie has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns true if the cookie expired before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| now > expires)
    }

    /// Whether this cookie should replace `current`, a stored cookie with the same name.
    ///
    /// Only a strictly later expiry replaces; a cookie without expiry never displaces one that
    /// was seen first.
    pub fn supersedes(&self, current: &Cookie) -> bool {
        matches!(
            (self.expires, current.expires),
            (Some(incoming), Some(existing)) if incoming > existing
        )
    }

    /// Formats cookie as "name=value" for HTTP Cookie header injection.
    pub fn to_cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Reads the `expires` attribute in either the RFC 1123 form or the older dashed form
/// (`Wed, 09-Jun-2021 10:18:14 GMT`).
fn parse_expires(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }

    ["%a, %d-%b-%Y %H:%M:%S GMT", "%a, %d-%b-%y %H:%M:%S GMT"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|date| date.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn test_parse_name_value_and_attributes() {
        let cookie =
            Cookie::parse("JSESSIONID=abc123; Path=/; Domain=.example.com; Secure; HttpOnly")
                .unwrap();

        assert_eq!(cookie.name, "JSESSIONID");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.path.as_deref(), Some("/"));
        assert_eq!(cookie.domain.as_deref(), Some(".example.com"));
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.expires, None);
    }

    #[test]
    fn test_parse_keeps_equals_in_value() {
        let cookie = Cookie::parse("token=a=b==; path=/").unwrap();
        assert_eq!(cookie.value, "a=b==");
        assert_eq!(cookie.to_cookie_header(), "token=a=b==");
    }

    #[test]
    fn test_parse_expires_formats() {
        let expected = Utc.with_ymd_and_hms(2031, 6, 9, 10, 18, 14).unwrap();

        let cookie = Cookie::parse("a=1; Expires=Mon, 09 Jun 2031 10:18:14 GMT").unwrap();
        assert_eq!(cookie.expires, Some(expected));

        let cookie = Cookie::parse("a=1; expires=Mon, 09-Jun-2031 10:18:14 GMT").unwrap();
        assert_eq!(cookie.expires, Some(expected));
    }

    #[test]
    fn test_parse_unreadable_expires_is_none() {
        let cookie = Cookie::parse("a=1; expires=someday").unwrap();
        assert_eq!(cookie.expires, None);
    }

    #[test]
    fn test_parse_rejects_missing_name() {
        assert!(matches!(
            Cookie::parse("novalue"),
            Err(CookieError::InvalidCookie(_))
        ));
        assert!(Cookie::parse("=value").is_err());
    }

    #[test]
    fn test_is_expired() {
        let now = Utc::now();
        let mut cookie = Cookie::new("test", "value");
        assert!(!cookie.is_expired_at(now));

        cookie.expires = Some(now - Duration::hours(1));
        assert!(cookie.is_expired_at(now));

        cookie.expires = Some(now + Duration::hours(1));
        assert!(!cookie.is_expired_at(now));
    }

    #[test]
    fn test_supersedes_only_on_later_expiry() {
        let now = Utc::now();
        let mut early = Cookie::new("a", "1");
        early.expires = Some(now + Duration::hours(1));
        let mut late = Cookie::new("a", "2");
        late.expires = Some(now + Duration::hours(2));
        let session = Cookie::new("a", "3");

        assert!(late.supersedes(&early));
        assert!(!early.supersedes(&late));
        assert!(!session.supersedes(&early));
        assert!(!late.supersedes(&session));
    }
}
