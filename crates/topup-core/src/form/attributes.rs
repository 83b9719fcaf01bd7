use std::{collections::BTreeMap, fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Attribute name to typed value, keys are lower-cased.
pub type Attributes = BTreeMap<String, AttrValue>;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^<([A-Za-z][\w-]*)(.*?)/?>$").expect("valid regex"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'<>`]+)))?"#)
        .expect("valid regex")
});

/// A typed HTML attribute value.
///
/// `true`/`false` become booleans and canonical integers become numbers, so a value posted back
/// renders exactly as it was read. Anything else, including zero padded digits, stays text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    #[allow(missing_docs)]
    Bool(bool),
    #[allow(missing_docs)]
    Int(i64),
    #[allow(missing_docs)]
    Text(String),
}

impl AttrValue {
    /// Types a raw attribute value.
    pub fn from_text(text: &str) -> Self {
        match text {
            "true" => return AttrValue::Bool(true),
            "false" => return AttrValue::Bool(false),
            _ => {}
        }

        let looks_numeric =
            !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit() || b == b'-');
        if looks_numeric {
            if let Ok(number) = text.parse::<i64>() {
                if number.to_string() == text {
                    return AttrValue::Int(number);
                }
            }
        }

        AttrValue::Text(text.to_string())
    }

    /// The text value, `None` for booleans and numbers.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether the value is empty text.
    pub fn is_empty(&self) -> bool {
        matches!(self, AttrValue::Text(text) if text.is_empty())
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(value) => write!(f, "{value}"),
            AttrValue::Int(value) => write!(f, "{value}"),
            AttrValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// Splits a single start tag such as `<input type="hidden" name="a">` into its lower-cased
/// tag name and attributes. Returns `None` if `tag` is not a start tag.
///
/// Values may be double quoted, single quoted or bare. An attribute without a value is stored
/// as empty text. When an attribute repeats the first occurrence is kept.
pub fn parse_tag(tag: &str) -> Option<(String, Attributes)> {
    let captures = TAG.captures(tag.trim())?;
    let name = captures.get(1)?.as_str().to_ascii_lowercase();
    let body = captures.get(2).map_or("", |m| m.as_str());

    let mut attributes = Attributes::new();
    for attribute in ATTRIBUTE.captures_iter(body) {
        let Some(key) = attribute.get(1) else {
            continue;
        };
        let value = attribute
            .get(2)
            .or_else(|| attribute.get(3))
            .or_else(|| attribute.get(4))
            .map_or("", |m| m.as_str());

        attributes
            .entry(key.as_str().to_ascii_lowercase())
            .or_insert_with(|| AttrValue::from_text(value));
    }

    Some((name, attributes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_types() {
        assert_eq!(AttrValue::from_text("true"), AttrValue::Bool(true));
        assert_eq!(AttrValue::from_text("false"), AttrValue::Bool(false));
        assert_eq!(AttrValue::from_text("6044"), AttrValue::Int(6044));
        assert_eq!(AttrValue::from_text("-12"), AttrValue::Int(-12));
        assert_eq!(AttrValue::from_text("True"), AttrValue::from("True"));
    }

    #[test]
    fn test_from_text_keeps_non_canonical_digits_as_text() {
        assert_eq!(AttrValue::from_text("09"), AttrValue::from("09"));
        assert_eq!(
            AttrValue::from_text("4111111111111111111111"),
            AttrValue::from("4111111111111111111111")
        );
        assert_eq!(AttrValue::from_text("2024-01-01"), AttrValue::from("2024-01-01"));
        assert_eq!(AttrValue::from_text("-"), AttrValue::from("-"));
        assert_eq!(AttrValue::from_text(""), AttrValue::from(""));
    }

    #[test]
    fn test_display_round_trips_text() {
        for raw in ["true", "42", "09", "a b", ""] {
            assert_eq!(AttrValue::from_text(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_parse_tag_quoting_styles() {
        let (name, attributes) = parse_tag(
            r#"<INPUT type=hidden name='PaReq' value="eJx=+/" data-x-y="1" disabled>"#,
        )
        .unwrap();

        assert_eq!(name, "input");
        assert_eq!(attributes["type"], AttrValue::from("hidden"));
        assert_eq!(attributes["name"], AttrValue::from("PaReq"));
        assert_eq!(attributes["value"], AttrValue::from("eJx=+/"));
        assert_eq!(attributes["data-x-y"], AttrValue::Int(1));
        assert_eq!(attributes["disabled"], AttrValue::from(""));
    }

    #[test]
    fn test_parse_tag_multiline_and_self_closing() {
        let (name, attributes) =
            parse_tag("<input\n  name=\"a\"\n  value=\"1\" />").unwrap();
        assert_eq!(name, "input");
        assert_eq!(attributes["name"], AttrValue::from("a"));
        assert_eq!(attributes["value"], AttrValue::Int(1));
    }

    #[test]
    fn test_parse_tag_first_duplicate_wins() {
        let (_, attributes) = parse_tag(r#"<a id="first" id="second">"#).unwrap();
        assert_eq!(attributes["id"], AttrValue::from("first"));
    }

    #[test]
    fn test_parse_tag_rejects_non_tags() {
        assert!(parse_tag("</form>").is_none());
        assert!(parse_tag("plain").is_none());
    }
}
