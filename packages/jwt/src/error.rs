//! JWT error types
//!
//! Two layers of errors live here:
//! - [`JwtError`]: what codec, key and signing-method operations return.
//! - [`ValidationError`]: what the parser returns, a bitmask of every
//!   independent reason a token was rejected plus an optional inner cause.

use bitflags::bitflags;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Boxed error returned by key resolvers and kept as an inner cause.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors raised by the codec, key handling and signing methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Structurally invalid input (bad segment count, bad base64url, bad JSON)
    #[error("malformed token: {0}")]
    Malformed(String),
    /// The key could not be used for this operation
    #[error("key is invalid: {0}")]
    InvalidKey(String),
    /// The key is of the wrong type for the signing method
    #[error("key is of invalid type: {alg} requires {expected}, got {actual}")]
    InvalidKeyType {
        /// Algorithm that rejected the key
        alg: String,
        /// Key type the algorithm accepts
        expected: &'static str,
        /// Key type that was presented
        actual: &'static str,
    },
    /// Cryptographic verification failed
    #[error("signature is invalid")]
    SignatureInvalid,
    /// Fixed-width signature had the wrong number of bytes
    #[error("signature length is invalid: expected {expected} bytes, got {actual}")]
    InvalidSignatureLength {
        /// Required length in bytes
        expected: usize,
        /// Length that was presented
        actual: usize,
    },
    /// Header or claims could not be turned into JSON
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The underlying crypto library failed to produce a signature
    #[error("signing error: {0}")]
    Signing(String),
}

impl JwtError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        JwtError::Malformed(msg.into())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        JwtError::InvalidKey(msg.into())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        JwtError::Serialization(msg.into())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: impl Into<String>) -> Self {
        JwtError::Signing(msg.into())
    }

    /// Flags the parser attaches in addition to `SIGNATURE_INVALID` when a
    /// signing method fails with this error.
    #[must_use]
    pub fn validation_flags(&self) -> ValidationErrorKind {
        match self {
            JwtError::InvalidKey(_) | JwtError::InvalidKeyType { .. } => {
                ValidationErrorKind::UNVERIFIABLE
            }
            JwtError::Malformed(_) | JwtError::InvalidSignatureLength { .. } => {
                ValidationErrorKind::MALFORMED
            }
            _ => ValidationErrorKind::empty(),
        }
    }
}

bitflags! {
    /// Independent reasons a token failed validation.
    ///
    /// Bit positions are stable and may be combined with `|`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ValidationErrorKind: u32 {
        /// Token could not be decoded
        const MALFORMED = 1 << 0;
        /// No key was available to verify the signature
        const UNVERIFIABLE = 1 << 1;
        /// Signature check failed or algorithm was rejected
        const SIGNATURE_INVALID = 1 << 2;
        /// `aud` did not match the expected audience
        const AUDIENCE = 1 << 3;
        /// `exp` is at or before the current time
        const EXPIRED = 1 << 4;
        /// `iat` is after the current time
        const ISSUED_AT = 1 << 5;
        /// `iss` did not match the expected issuer
        const ISSUER = 1 << 6;
        /// `nbf` is after the current time
        const NOT_VALID_YET = 1 << 7;
    }
}

/// Structured rejection returned by the parser.
///
/// Built once per failing call; flags only accumulate within that call.
#[derive(Debug, Clone)]
pub struct ValidationError {
    errors: ValidationErrorKind,
    inner: Option<Arc<dyn StdError + Send + Sync>>,
    text: String,
}

impl ValidationError {
    /// Create a validation error with a summary and flags
    #[must_use]
    pub fn new(text: impl Into<String>, errors: ValidationErrorKind) -> Self {
        Self {
            errors,
            inner: None,
            text: text.into(),
        }
    }

    /// Attach a lower-level cause
    #[must_use]
    pub fn with_inner<E>(mut self, inner: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.inner = Some(Arc::new(inner));
        self
    }

    /// Attach a boxed lower-level cause, as returned by a key resolver
    #[must_use]
    pub fn with_boxed_inner(mut self, inner: BoxError) -> Self {
        self.inner = Some(Arc::from(inner));
        self
    }

    /// The accumulated flags
    #[must_use]
    pub fn errors(&self) -> ValidationErrorKind {
        self.errors
    }

    /// True if every bit in `kind` is set
    #[must_use]
    pub fn is(&self, kind: ValidationErrorKind) -> bool {
        self.errors.contains(kind)
    }

    /// The wrapped cause, if any
    #[must_use]
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.inner.as_deref()
    }

    /// Summary text set at construction
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fold another error from the same call into this one.
    ///
    /// Flags are OR-ed. The first summary and the first inner cause win.
    pub fn merge(&mut self, other: ValidationError) {
        self.errors |= other.errors;
        if self.text.is_empty() {
            self.text = other.text;
        }
        if self.inner.is_none() {
            self.inner = other.inner;
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(inner) = &self.inner {
            write!(f, "{inner}")
        } else if !self.text.is_empty() {
            f.write_str(&self.text)
        } else {
            f.write_str("token is invalid")
        }
    }
}

impl StdError for ValidationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<JwtError> for ValidationError {
    fn from(err: JwtError) -> Self {
        let flags = match &err {
            JwtError::SignatureInvalid => ValidationErrorKind::SIGNATURE_INVALID,
            other => other.validation_flags(),
        };
        ValidationError::new(err.to_string(), flags).with_inner(err)
    }
}
