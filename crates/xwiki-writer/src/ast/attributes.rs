//! Attribute maps carried by document tree nodes.

use std::fmt;

use ecow::EcoString;
use indexmap::IndexMap;
use serde::Deserialize;

/// A single attribute value.
///
/// Every JSON value deserializes into one of these, so an odd attribute never
/// rejects the document it belongs to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Boolean flag, e.g. `internal`
    Bool(bool),
    /// Integer value, e.g. `cols` or `colwidth`
    Int(i64),
    /// Non-integer number, e.g. a relative `colwidth` of `33.3`
    Float(f64),
    /// String value, e.g. `refuri`
    Str(EcoString),
    /// Ordered list of strings, e.g. `ids` or `classes`
    List(Vec<EcoString>),
    /// An explicit `null`
    Null,
    /// Any other shape, such as a mixed list or an object. Kept for display
    /// only; the typed accessors read it as absent.
    Other(serde_json::Value),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(value) => write!(f, "{}", u8::from(*value)),
            AttrValue::Int(value) => write!(f, "{value}"),
            AttrValue::Float(value) => write!(f, "{value}"),
            AttrValue::Str(value) => f.write_str(value),
            AttrValue::List(values) => {
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    f.write_str(value)?;
                }
                Ok(())
            }
            AttrValue::Null => Ok(()),
            AttrValue::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.into())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value.into())
    }
}

impl From<EcoString> for AttrValue {
    fn from(value: EcoString) -> Self {
        AttrValue::Str(value)
    }
}

impl<S: Into<EcoString>> From<Vec<S>> for AttrValue {
    fn from(values: Vec<S>) -> Self {
        AttrValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Insertion-ordered attribute mapping.
///
/// Lookups never fail: a missing key, or a value of an unexpected shape,
/// reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<EcoString, AttrValue>);

impl Attributes {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value in place.
    pub fn insert(&mut self, key: impl Into<EcoString>, value: impl Into<AttrValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw value lookup.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// String value of `key`.
    pub fn str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            AttrValue::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// List value of `key`. A plain string reads as a one-element list.
    pub fn list(&self, key: &str) -> &[EcoString] {
        match self.get(key) {
            Some(AttrValue::List(values)) => values,
            Some(AttrValue::Str(value)) => std::slice::from_ref(value),
            _ => &[],
        }
    }

    /// Boolean value of `key`; `1`, `"1"` and `"true"` all read as set.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(AttrValue::Bool(value)) => *value,
            Some(AttrValue::Int(value)) => *value != 0,
            Some(AttrValue::Float(value)) => *value != 0.0,
            Some(AttrValue::Str(value)) => matches!(value.as_str(), "1" | "true" | "True"),
            _ => false,
        }
    }

    /// Integer value of `key`, parsing string values and truncating
    /// fractional ones.
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            AttrValue::Int(value) => Some(*value),
            AttrValue::Float(value) if value.is_finite() => Some(value.trunc() as i64),
            AttrValue::Str(value) => value.trim().parse().ok(),
            _ => None,
        }
    }

    /// Iterates the attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&EcoString, &AttrValue)> {
        self.0.iter()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<EcoString>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_read_as_absent() {
        let attrs = Attributes::new();
        assert_eq!(attrs.str("refuri"), None);
        assert!(attrs.list("ids").is_empty());
        assert!(!attrs.flag("internal"));
        assert_eq!(attrs.int("cols"), None);
    }

    #[test]
    fn lenient_coercions() {
        let attrs: Attributes = [
            ("stub", AttrValue::from("1")),
            ("colwidth", AttrValue::from("30")),
            ("classes", AttrValue::from("code")),
        ]
        .into_iter()
        .collect();

        assert!(attrs.flag("stub"));
        assert_eq!(attrs.int("colwidth"), Some(30));
        assert_eq!(attrs.list("classes"), [EcoString::from("code")]);
    }

    #[test]
    fn unusual_json_values_read_as_absent_or_coerced() {
        let attrs: Attributes = serde_json::from_str(
            r#"{"title": null, "colwidth": 33.7, "backrefs": [1, "a"], "stub": 1.0}"#,
        )
        .unwrap();

        assert_eq!(attrs.get("title"), Some(&AttrValue::Null));
        assert_eq!(attrs.str("title"), None);
        assert!(attrs.list("title").is_empty());
        assert_eq!(attrs.int("colwidth"), Some(33));
        assert!(attrs.list("backrefs").is_empty());
        assert!(attrs.flag("stub"));
        assert_eq!(attrs.get("colwidth").unwrap().to_string(), "33.7");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut attrs = Attributes::new();
        attrs.insert("uri", "a.png");
        attrs.insert("alt", "A");
        attrs.insert("uri", "b.png");

        let keys: Vec<_> = attrs.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["uri", "alt"]);
        assert_eq!(attrs.str("uri"), Some("b.png"));
    }
}
