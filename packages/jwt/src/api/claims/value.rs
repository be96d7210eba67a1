//! Dynamically typed claim values
//!
//! JSON numbers decode one of two ways, picked by [`NumberMode`]:
//! - `Float`: every number becomes [`ClaimValue::Float`].
//! - `Decimal`: every number keeps its literal text as [`ClaimValue::Number`]
//!   and is only parsed when a comparison needs it.
//!
//! No other numeric coercion happens.

use serde::{ser::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How JSON numbers in open claims are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberMode {
    /// Decode numbers as `f64`
    #[default]
    Float,
    /// Keep numbers as exact decimal text
    Decimal,
}

/// A JSON number kept as its literal decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonNumber(String);

impl JsonNumber {
    /// Wrap decimal text. The text is not checked until it is read as a number.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The literal text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse as a signed integer
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    /// Parse as a float
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.0.parse::<f64>().ok().filter(|f| f.is_finite())
    }

    /// Read as a Unix timestamp in whole seconds.
    ///
    /// Integral text is parsed exactly; fractional or exponent forms are
    /// truncated toward zero.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<i64> {
        self.as_i64().or_else(|| self.as_f64().map(|f| f as i64))
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One claim value.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    /// JSON `null`
    Null,
    /// JSON boolean
    Bool(bool),
    /// Number decoded as a float
    Float(f64),
    /// Number kept as exact decimal text
    Number(JsonNumber),
    /// JSON string
    String(String),
    /// JSON array
    Array(Vec<ClaimValue>),
    /// JSON object
    Object(BTreeMap<String, ClaimValue>),
}

impl ClaimValue {
    /// Convert a decoded JSON value, applying `mode` to every number
    #[must_use]
    pub fn from_json(value: Value, mode: NumberMode) -> Self {
        match value {
            Value::Null => ClaimValue::Null,
            Value::Bool(b) => ClaimValue::Bool(b),
            Value::Number(n) => match mode {
                NumberMode::Decimal => ClaimValue::Number(JsonNumber(n.to_string())),
                // Out-of-range literals keep their text rather than becoming infinity.
                NumberMode::Float => n
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .map_or_else(|| ClaimValue::Number(JsonNumber(n.to_string())), ClaimValue::Float),
            },
            Value::String(s) => ClaimValue::String(s),
            Value::Array(items) => ClaimValue::Array(
                items
                    .into_iter()
                    .map(|v| ClaimValue::from_json(v, mode))
                    .collect(),
            ),
            Value::Object(map) => ClaimValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, ClaimValue::from_json(v, mode)))
                    .collect(),
            ),
        }
    }

    /// Borrow as a string
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// True for either number representation
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, ClaimValue::Float(_) | ClaimValue::Number(_))
    }
}

impl Serialize for ClaimValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClaimValue::Null => serializer.serialize_unit(),
            ClaimValue::Bool(b) => serializer.serialize_bool(*b),
            ClaimValue::Float(f) => serializer.serialize_f64(*f),
            ClaimValue::Number(n) => serde_json::Number::from_str(n.as_str())
                .map_err(|e| S::Error::custom(format!("invalid number {n}: {e}")))?
                .serialize(serializer),
            ClaimValue::String(s) => serializer.serialize_str(s),
            ClaimValue::Array(items) => items.serialize(serializer),
            ClaimValue::Object(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ClaimValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| ClaimValue::from_json(v, NumberMode::Float))
    }
}

impl From<&str> for ClaimValue {
    fn from(s: &str) -> Self {
        ClaimValue::String(s.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(s: String) -> Self {
        ClaimValue::String(s)
    }
}

impl From<bool> for ClaimValue {
    fn from(b: bool) -> Self {
        ClaimValue::Bool(b)
    }
}

impl From<f64> for ClaimValue {
    fn from(f: f64) -> Self {
        ClaimValue::Float(f)
    }
}

impl From<JsonNumber> for ClaimValue {
    fn from(n: JsonNumber) -> Self {
        ClaimValue::Number(n)
    }
}

impl From<Vec<ClaimValue>> for ClaimValue {
    fn from(items: Vec<ClaimValue>) -> Self {
        ClaimValue::Array(items)
    }
}
