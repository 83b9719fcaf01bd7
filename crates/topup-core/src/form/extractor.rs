use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{AttrValue, Attributes, FormValues, parse_tag};

// Tag body: quoted values are consumed whole, so a `>` inside quotes does not end the tag.
const TAG_BODY: &str = r#"(?:"[^"]*"|'[^']*'|[^>"'])"#;

static FORM_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?is)<form\b{TAG_BODY}*>")).expect("valid regex")
});
static FORM_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</form\s*>").expect("valid regex"));
static NAMED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?is)<[A-Za-z][\w-]*\s{TAG_BODY}*?\bname\s*={TAG_BODY}*>"
    ))
    .expect("valid regex")
});

/// A form scraped from an HTML page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    /// The `action` attribute, empty when absent.
    pub action: String,
    /// The `method` attribute, `get` when absent.
    pub method: String,
    /// Every attribute of the `<form>` tag.
    pub attributes: Attributes,
    /// Input name to value. The last input with a given name wins.
    pub values: FormValues,
}

impl Form {
    fn new(attributes: Attributes, body: &str) -> Self {
        let text = |key: &str| attributes.get(key).map(ToString::to_string);

        Self {
            action: text("action").unwrap_or_default(),
            method: text("method").unwrap_or_else(|| "get".to_string()),
            values: scan_values(body),
            attributes,
        }
    }

    /// Value of the input called `name`.
    pub fn value(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name)
    }
}

/// Which form to pick from a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`, matches the `id` attribute.
    Id(String),
    /// `.class`, matches one of the space separated `class` tokens.
    Class(String),
    /// Anything else matches the `name` attribute.
    Name(String),
}

impl Selector {
    fn matches(&self, attributes: &Attributes) -> bool {
        let attribute = |key: &str| attributes.get(key).map(ToString::to_string);

        match self {
            Selector::Id(id) => attribute("id").is_some_and(|value| &value == id),
            Selector::Class(class) => attribute("class")
                .is_some_and(|value| value.split_whitespace().any(|token| token == class)),
            Selector::Name(name) => attribute("name").is_some_and(|value| &value == name),
        }
    }
}

impl From<&str> for Selector {
    fn from(target: &str) -> Self {
        if let Some(id) = target.strip_prefix('#') {
            Selector::Id(id.to_string())
        } else if let Some(class) = target.strip_prefix('.') {
            Selector::Class(class.to_string())
        } else {
            Selector::Name(target.to_string())
        }
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(target: &str) -> Result<Self, Self::Err> {
        Ok(target.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Name(name) => f.write_str(name),
        }
    }
}

/// No well-formed form matched the selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No form matching {}", .selector.as_deref().unwrap_or("<any>"))]
pub struct FormNotFound {
    /// The selector that was searched for, `None` for an untargeted search.
    pub selector: Option<String>,
}

/// Finds the first form matching `target` (`#id`, `.class` or a name), or the first form at all
/// when `target` is `None`.
pub fn extract(html: &str, target: Option<&str>) -> Result<Form, FormNotFound> {
    let selector = target.map(Selector::from);

    FormScanner::new(html)
        .find(|(attributes, _)| selector.as_ref().is_none_or(|s| s.matches(attributes)))
        .map(|(attributes, body)| Form::new(attributes, body))
        .ok_or_else(|| FormNotFound {
            selector: target.map(str::to_string),
        })
}

/// Every well-formed form on the page, in document order.
pub fn extract_all(html: &str) -> Vec<Form> {
    FormScanner::new(html)
        .map(|(attributes, body)| Form::new(attributes, body))
        .collect()
}

/// Walks `<form ...>` ... `</form>` regions. A form without a closing tag ends the scan.
struct FormScanner<'a> {
    html: &'a str,
    position: usize,
}

impl<'a> FormScanner<'a> {
    fn new(html: &'a str) -> Self {
        Self { html, position: 0 }
    }
}

impl<'a> Iterator for FormScanner<'a> {
    type Item = (Attributes, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let open = FORM_OPEN.find_at(self.html, self.position)?;
            let close = FORM_CLOSE.find_at(self.html, open.end())?;
            self.position = close.end();

            if let Some((_, attributes)) = parse_tag(open.as_str()) {
                return Some((attributes, self.html.get(open.end()..close.start())?));
            }
        }
    }
}

fn scan_values(body: &str) -> FormValues {
    let mut values = FormValues::new();

    for tag in NAMED_TAG.find_iter(body) {
        let Some((_, mut attributes)) = parse_tag(tag.as_str()) else {
            continue;
        };
        let Some(name) = attributes.remove("name") else {
            continue;
        };
        let name = name.to_string();
        if name.is_empty() {
            continue;
        }

        let value = attributes
            .remove("value")
            .unwrap_or_else(|| AttrValue::Text(String::new()));
        values.insert(name, value);
    }

    values
}
