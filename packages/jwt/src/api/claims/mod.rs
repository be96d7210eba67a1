//! JWT Claims
//!
//! [`Claims`] is the capability every payload type provides: check its own
//! time fields against a clock reading. Two implementations ship here,
//! [`MapClaims`] for free-form payloads and [`StandardClaims`] for the fixed
//! registered set.

pub mod map_claims;
pub mod standard_claims;
pub mod validation;
pub mod value;

pub use map_claims::MapClaims;
pub use standard_claims::StandardClaims;
pub use validation::TimeClaims;
pub use value::{ClaimValue, JsonNumber, NumberMode};

use crate::error::ValidationError;
use serde::{de::DeserializeOwned, Serialize};

/// Payload carried by a token.
pub trait Claims: Serialize + DeserializeOwned {
    /// Check time-based claims against `now` (Unix seconds).
    ///
    /// `leeway` is the allowed clock skew in seconds.
    ///
    /// # Errors
    /// Returns every violation found (`EXPIRED`, `NOT_VALID_YET`,
    /// `ISSUED_AT`, `MALFORMED`) in one [`ValidationError`].
    fn validate(&self, now: i64, leeway: i64) -> Result<(), ValidationError>;

    /// Check `aud` against `expected`; absent passes unless `required`.
    fn verify_audience(&self, _expected: &str, required: bool) -> bool {
        !required
    }

    /// Check `iss` against `expected`; absent passes unless `required`.
    fn verify_issuer(&self, _expected: &str, required: bool) -> bool {
        !required
    }

    /// Decode the claims segment's JSON.
    ///
    /// Types with dynamically typed numbers honour `mode`; the default
    /// ignores it and uses plain serde decoding.
    ///
    /// # Errors
    /// Returns the JSON error if the payload does not fit `Self`.
    fn decode(json: &[u8], _mode: NumberMode) -> serde_json::Result<Self> {
        serde_json::from_slice(json)
    }
}
