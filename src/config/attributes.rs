use std::collections::{BTreeMap, HashMap};

/// Attributes the glass element reacts to after it is attached.
pub const OBSERVED_ATTRIBUTES: &[&str] = &[
    "width",
    "height",
    "radius",
    "depth",
    "blur",
    "strength",
    "chromatic-aberration",
    "debug",
    "background-color",
    "responsive",
    "base-width",
    "base-height",
    "auto-size",
    "min-width",
    "min-height",
];

pub fn is_observed(name: &str) -> bool {
    OBSERVED_ATTRIBUTES.contains(&name)
}

/// Read-only view of a host's attributes.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Leading-integer parse in the manner of HTML attribute reflection.
///
/// Leading whitespace and an optional sign are accepted, parsing stops at the first non-digit,
/// and a value with no digits yields `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Positive integer attribute; missing, unparsable, zero or negative values yield `None`.
pub fn positive_attribute(src: &dyn AttributeSource, name: &str) -> Option<u32> {
    let raw = src.attribute(name)?;
    let n = parse_int_prefix(&raw)?;
    if n <= 0 {
        return None;
    }
    Some(u32::try_from(n).unwrap_or(u32::MAX))
}
