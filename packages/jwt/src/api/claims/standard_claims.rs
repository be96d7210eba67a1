//! Registered claims with fixed field types

use super::validation::{self, TimeClaims};
use super::Claims;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// Registered claims with fixed types.
///
/// Zero timestamps and empty strings mean "not present" and are left out of
/// the encoded JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardClaims {
    /// Audience.
    #[serde(rename = "aud", default, skip_serializing_if = "String::is_empty")]
    pub audience: String,
    /// Expiry (unix seconds).
    #[serde(rename = "exp", default, skip_serializing_if = "is_zero")]
    pub expires_at: i64,
    /// JWT ID.
    #[serde(rename = "jti", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Issued-at (unix seconds).
    #[serde(rename = "iat", default, skip_serializing_if = "is_zero")]
    pub issued_at: i64,
    /// Issuer.
    #[serde(rename = "iss", default, skip_serializing_if = "String::is_empty")]
    pub issuer: String,
    /// Not before (unix seconds).
    #[serde(rename = "nbf", default, skip_serializing_if = "is_zero")]
    pub not_before: i64,
    /// Subject.
    #[serde(rename = "sub", default, skip_serializing_if = "String::is_empty")]
    pub subject: String,
}

fn present(v: i64) -> Option<i64> {
    (v != 0).then_some(v)
}

impl StandardClaims {
    fn time_claims(&self) -> TimeClaims {
        TimeClaims {
            expires_at: present(self.expires_at),
            not_before: present(self.not_before),
            issued_at: present(self.issued_at),
        }
    }

    /// Compare `exp` against `cmp`; absent passes unless `required`.
    #[must_use]
    pub fn verify_expires_at(&self, cmp: i64, required: bool) -> bool {
        validation::verify_exp(present(self.expires_at), cmp, 0, required)
    }

    /// Compare `nbf` against `cmp`; absent passes unless `required`.
    #[must_use]
    pub fn verify_not_before(&self, cmp: i64, required: bool) -> bool {
        validation::verify_nbf(present(self.not_before), cmp, 0, required)
    }

    /// Compare `iat` against `cmp`; absent passes unless `required`.
    #[must_use]
    pub fn verify_issued_at(&self, cmp: i64, required: bool) -> bool {
        validation::verify_iat(present(self.issued_at), cmp, 0, required)
    }
}

impl Claims for StandardClaims {
    fn validate(&self, now: i64, leeway: i64) -> Result<(), ValidationError> {
        validation::validate_time_claims(self.time_claims(), now, leeway)
    }

    fn verify_audience(&self, expected: &str, required: bool) -> bool {
        if self.audience.is_empty() {
            return !required;
        }
        self.audience == expected
    }

    fn verify_issuer(&self, expected: &str, required: bool) -> bool {
        if self.issuer.is_empty() {
            return !required;
        }
        self.issuer == expected
    }
}
