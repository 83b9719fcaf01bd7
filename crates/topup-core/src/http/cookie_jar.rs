//! Host scoped cookie bookkeeping shared by every [CookieStore](super::CookieStore).

use chrono::{DateTime, Utc};
use url::Url;

use super::Cookie;

/// Parses a batch of `Set-Cookie` lines received in a single response.
///
/// Cookies that already expired are dropped. When a name repeats, the first one is kept unless
/// a later line carries a strictly later expiry. Unparseable lines are skipped.
pub fn parse_set_cookie<I, S>(lines: I) -> Vec<Cookie>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_set_cookie_at(lines, Utc::now())
}

pub(crate) fn parse_set_cookie_at<I, S>(lines: I, now: DateTime<Utc>) -> Vec<Cookie>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed: Vec<Cookie> = Vec::new();

    for line in lines {
        let cookie = match Cookie::parse(line.as_ref()) {
            Ok(cookie) => cookie,
            Err(e) => {
                tracing::warn!("Skipping Set-Cookie line: {e}");
                continue;
            }
        };

        if cookie.is_expired_at(now) {
            continue;
        }

        upsert(&mut parsed, cookie);
    }

    parsed
}

/// Merges freshly parsed cookies into the cookies stored for one host.
///
/// New names are appended, known names are only replaced by a cookie with a later expiry.
pub fn merge(existing: &mut Vec<Cookie>, incoming: Vec<Cookie>) {
    for cookie in incoming {
        upsert(existing, cookie);
    }
}

fn upsert(cookies: &mut Vec<Cookie>, cookie: Cookie) {
    match cookies.iter_mut().find(|c| c.name == cookie.name) {
        Some(current) if cookie.supersedes(current) => *current = cookie,
        Some(_) => {}
        None => cookies.push(cookie),
    }
}

/// Renders the `Cookie` header value, `name=value; name=value`, skipping expired cookies.
pub fn header_value(cookies: &[Cookie]) -> Option<String> {
    let now = Utc::now();
    let pairs: Vec<String> = cookies
        .iter()
        .filter(|c| !c.is_expired_at(now))
        .map(Cookie::to_cookie_header)
        .collect();

    (!pairs.is_empty()).then(|| pairs.join("; "))
}

/// Strips a leading `www.` so `www.example.com` and `example.com` share one jar.
pub fn normalize_host(host: &str) -> String {
    match host.get(..4).zip(host.get(4..)) {
        Some((prefix, rest)) if prefix.eq_ignore_ascii_case("www.") => rest.to_string(),
        _ => host.to_string(),
    }
}

/// Jar key of a request url, the normalized host plus an explicit port when present.
pub fn host_key(url: &Url) -> Option<String> {
    let host = normalize_host(url.host_str()?);
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    })
}
