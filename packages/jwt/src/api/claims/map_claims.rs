//! Open claims: an arbitrary string-keyed map of claim values.

use super::validation::{self, accumulate, TimeClaims};
use super::value::{ClaimValue, NumberMode};
use super::Claims;
use crate::error::{ValidationError, ValidationErrorKind};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

/// Claims as a free-form map.
///
/// `exp`, `nbf` and `iat` are read by key when validating; any other key is
/// carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapClaims(BTreeMap<String, ClaimValue>);

impl MapClaims {
    /// Empty claims
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Decode a JSON object, applying `mode` to every number
    ///
    /// # Errors
    /// Fails if `json` is not a JSON object.
    pub fn from_json_slice(json: &[u8], mode: NumberMode) -> serde_json::Result<Self> {
        let map: serde_json::Map<String, Value> = serde_json::from_slice(json)?;
        Ok(Self::from_json_map(map, mode))
    }

    fn from_json_map(map: serde_json::Map<String, Value>, mode: NumberMode) -> Self {
        Self(
            map.into_iter()
                .map(|(k, v)| (k, ClaimValue::from_json(v, mode)))
                .collect(),
        )
    }

    /// Read a numeric claim as whole Unix seconds.
    ///
    /// # Errors
    /// A present value that is not a number, or decimal text that does not
    /// parse, is `MALFORMED`.
    pub fn timestamp(&self, name: &str) -> Result<Option<i64>, ValidationError> {
        let malformed = |why: &str| {
            ValidationError::new(
                format!("claim {name} {why}"),
                ValidationErrorKind::MALFORMED,
            )
        };
        match self.0.get(name) {
            None => Ok(None),
            Some(ClaimValue::Float(f)) if f.is_finite() => Ok(Some(*f as i64)),
            Some(ClaimValue::Float(_)) => Err(malformed("is not a finite number")),
            Some(ClaimValue::Number(n)) => n
                .as_timestamp()
                .map(Some)
                .ok_or_else(|| malformed("is not a valid number")),
            Some(_) => Err(malformed("must be a number")),
        }
    }

    /// Compare `exp` against `cmp`; absent passes unless `required`.
    #[must_use]
    pub fn verify_expires_at(&self, cmp: i64, required: bool) -> bool {
        match self.timestamp("exp") {
            Ok(exp) => validation::verify_exp(exp, cmp, 0, required),
            Err(_) => false,
        }
    }

    /// Compare `nbf` against `cmp`; absent passes unless `required`.
    #[must_use]
    pub fn verify_not_before(&self, cmp: i64, required: bool) -> bool {
        match self.timestamp("nbf") {
            Ok(nbf) => validation::verify_nbf(nbf, cmp, 0, required),
            Err(_) => false,
        }
    }

    /// Compare `iat` against `cmp`; absent passes unless `required`.
    #[must_use]
    pub fn verify_issued_at(&self, cmp: i64, required: bool) -> bool {
        match self.timestamp("iat") {
            Ok(iat) => validation::verify_iat(iat, cmp, 0, required),
            Err(_) => false,
        }
    }
}

impl Deref for MapClaims {
    type Target = BTreeMap<String, ClaimValue>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MapClaims {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: Into<String>, V: Into<ClaimValue>> FromIterator<(K, V)> for MapClaims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Serialize for MapClaims {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MapClaims {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Self::from_json_map(map, NumberMode::Float)),
            _ => Err(D::Error::custom("claims must be a JSON object")),
        }
    }
}

impl Claims for MapClaims {
    fn validate(&self, now: i64, leeway: i64) -> Result<(), ValidationError> {
        let mut violations = None;
        let mut read = |name: &str| match self.timestamp(name) {
            Ok(v) => v,
            Err(e) => {
                accumulate(&mut violations, e);
                None
            }
        };
        let times = TimeClaims {
            expires_at: read("exp"),
            not_before: read("nbf"),
            issued_at: read("iat"),
        };

        if let Err(e) = validation::validate_time_claims(times, now, leeway) {
            accumulate(&mut violations, e);
        }
        violations.map_or(Ok(()), Err)
    }

    fn verify_audience(&self, expected: &str, required: bool) -> bool {
        match self.0.get("aud") {
            None => !required,
            Some(ClaimValue::String(aud)) if aud.is_empty() => !required,
            Some(ClaimValue::String(aud)) => aud == expected,
            Some(ClaimValue::Array(items)) => items.iter().any(|v| v.as_str() == Some(expected)),
            Some(_) => false,
        }
    }

    fn verify_issuer(&self, expected: &str, required: bool) -> bool {
        match self.0.get("iss") {
            None => !required,
            Some(ClaimValue::String(iss)) if iss.is_empty() => !required,
            Some(ClaimValue::String(iss)) => iss == expected,
            Some(_) => false,
        }
    }

    fn decode(json: &[u8], mode: NumberMode) -> serde_json::Result<Self> {
        Self::from_json_slice(json, mode)
    }
}
