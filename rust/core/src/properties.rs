// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed attribute values and the ordered property bag attached to each
//! cell space.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar attribute value read from a feature's properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl PropertyValue {
    /// Returns `false` for null and NaN, which count as missing everywhere.
    pub fn is_present(&self) -> bool {
        match self {
            PropertyValue::Null => false,
            PropertyValue::Float(f) => !f.is_nan(),
            _ => true,
        }
    }

    /// Truthiness used by the back-fill rules: empty strings, zero and
    /// `false` are falsy, as are the absent values.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropertyValue::Null => false,
            PropertyValue::Bool(b) => *b,
            PropertyValue::Int(i) => *i != 0,
            PropertyValue::Float(f) => !f.is_nan() && *f != 0.0,
            PropertyValue::String(s) => !s.is_empty(),
        }
    }

    /// Numeric view of the value. Booleans are not numbers here.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Int(i) => Some(*i as f64),
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Converts a JSON property value. Arrays and objects are kept as
    /// their compact JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PropertyValue::Null,
            serde_json::Value::Bool(b) => PropertyValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Int(i),
                None => PropertyValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => PropertyValue::String(s.clone()),
            other => PropertyValue::String(other.to_string()),
        }
    }
}

/// Formats a float the way floor labels and coordinates are written:
/// integral values keep a trailing `.0`.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{}inf", sign)
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        format!("{}", f)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => f.write_str("None"),
            PropertyValue::Bool(true) => f.write_str("True"),
            PropertyValue::Bool(false) => f.write_str("False"),
            PropertyValue::Int(i) => write!(f, "{}", i),
            PropertyValue::Float(v) => f.write_str(&format_float(*v)),
            PropertyValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Int(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

/// Insertion-ordered map from attribute name to value.
///
/// Replacing a key keeps its original position; new keys are appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    entries: Vec<(String, PropertyValue)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the value only if it is present (not null, not NaN).
    pub fn get_present(&self, key: &str) -> Option<&PropertyValue> {
        self.get(key).filter(|v| v.is_present())
    }

    /// Returns the value only if it is truthy.
    pub fn get_truthy(&self, key: &str) -> Option<&PropertyValue> {
        self.get(key).filter(|v| v.is_truthy())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_label_formatting() {
        assert_eq!(PropertyValue::Int(7).to_string(), "7");
        assert_eq!(PropertyValue::Float(2.0).to_string(), "2.0");
        assert_eq!(PropertyValue::Float(1.5).to_string(), "1.5");
        assert_eq!(PropertyValue::Float(-0.25).to_string(), "-0.25");
        assert_eq!(PropertyValue::Float(f64::NAN).to_string(), "nan");
        assert_eq!(PropertyValue::Bool(true).to_string(), "True");
        assert_eq!(PropertyValue::Null.to_string(), "None");
        assert_eq!(PropertyValue::from("Lobby").to_string(), "Lobby");
    }

    #[test]
    fn nan_and_null_are_absent() {
        assert!(!PropertyValue::Null.is_present());
        assert!(!PropertyValue::Float(f64::NAN).is_present());
        assert!(PropertyValue::Float(0.0).is_present());
        assert!(PropertyValue::from("").is_present());
    }

    #[test]
    fn truthiness() {
        assert!(!PropertyValue::from("").is_truthy());
        assert!(!PropertyValue::Int(0).is_truthy());
        assert!(!PropertyValue::Float(f64::NAN).is_truthy());
        assert!(!PropertyValue::Bool(false).is_truthy());
        assert!(PropertyValue::from("x").is_truthy());
        assert!(PropertyValue::Int(-3).is_truthy());
    }

    #[test]
    fn from_json_values() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"a": 1, "b": 1.5, "c": null, "d": [1, 2], "e": true}"#)
                .unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(PropertyValue::from_json(&obj["a"]), PropertyValue::Int(1));
        assert_eq!(PropertyValue::from_json(&obj["b"]), PropertyValue::Float(1.5));
        assert_eq!(PropertyValue::from_json(&obj["c"]), PropertyValue::Null);
        assert_eq!(PropertyValue::from_json(&obj["d"]), PropertyValue::from("[1,2]"));
        assert_eq!(PropertyValue::from_json(&obj["e"]), PropertyValue::Bool(true));
    }

    #[test]
    fn insert_keeps_position_of_existing_key() {
        let mut props: Properties = [("a", 1i64), ("b", 2i64)].into_iter().collect();
        let previous = props.insert("a", "x");
        assert_eq!(previous, Some(PropertyValue::Int(1)));
        props.insert("c", PropertyValue::Null);

        let keys: Vec<&str> = props.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(props.get("a"), Some(&PropertyValue::from("x")));
        assert!(props.get_present("c").is_none());
        assert!(props.contains_key("c"));
    }
}
