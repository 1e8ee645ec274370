//! Query-string and form-body parameter extraction.
//!
//! Both use the `key=value&key=value` grammar. A pair without `=` maps to an
//! empty value; keys and values are percent-decoded with `+` as space.

use std::collections::HashMap;

use url::form_urlencoded;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Parses `a=1&b=2` into a map. Later duplicates overwrite earlier ones.
pub fn parse_pairs(input: &str) -> HashMap<String, String> {
    parse_pairs_bytes(input.as_bytes())
}

pub fn parse_pairs_bytes(input: &[u8]) -> HashMap<String, String> {
    form_urlencoded::parse(input).into_owned().collect()
}

/// Overlays `overlay` on `base`; `overlay` wins on key collision.
pub fn merge(base: &mut HashMap<String, String>, overlay: HashMap<String, String>) {
    base.extend(overlay);
}

/// A body is decoded as a form when it carries no `Content-Type` at all or
/// declares `application/x-www-form-urlencoded` (parameters like `charset`
/// are ignored).
pub fn is_form_body(content_type: Option<&str>) -> bool {
    match content_type {
        None => true,
        Some(value) => value
            .split(';')
            .next()
            .map(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
            .unwrap_or(false),
    }
}
