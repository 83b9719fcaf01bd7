//! HTML form extraction.
//!
//! A bounded scan over `<form>` regions and their named inputs, enough for server rendered
//! payment pages. There is no DOM and no script evaluation.

use std::collections::BTreeMap;

mod attributes;
mod extractor;

pub use attributes::{AttrValue, Attributes, parse_tag};
pub use extractor::{Form, FormNotFound, Selector, extract, extract_all};

/// Input name to value.
pub type FormValues = BTreeMap<String, AttrValue>;
