//! JWT type definitions

use crate::api::algorithms::utils::{encode_segment, join_segments};
use crate::api::claims::{Claims, MapClaims};
use crate::api::keys::Key;
use crate::error::{JwtError, JwtResult};
use crate::traits::SigningMethod;
use serde_json::Value;
use std::sync::Arc;

/// JWT header: always carries `alg` and `typ`, extra fields pass through.
pub type Header = serde_json::Map<String, Value>;

/// A token being built for signing, or one produced by the parser.
#[derive(Debug, Clone)]
pub struct Token<C = MapClaims> {
    /// The original token text; empty for tokens built locally
    pub raw: String,
    /// Signing method, attached at construction or once the parser resolves `alg`
    pub method: Option<Arc<dyn SigningMethod>>,
    /// Decoded header
    pub header: Header,
    /// Decoded claims
    pub claims: C,
    /// Signature segment as base64url text
    pub signature: String,
    /// Set only by a verification that returned no error
    pub valid: bool,
}

impl Token<MapClaims> {
    /// New token with empty open claims
    #[must_use]
    pub fn new(method: impl SigningMethod + 'static) -> Self {
        Self::with_claims(method, MapClaims::new())
    }
}

impl<C: Claims> Token<C> {
    /// New token with header `{"alg": <method>, "typ": "JWT"}` and `claims`
    #[must_use]
    pub fn with_claims(method: impl SigningMethod + 'static, claims: C) -> Self {
        let mut header = Header::new();
        header.insert("typ".to_string(), Value::from("JWT"));
        header.insert("alg".to_string(), Value::from(method.alg()));
        Self {
            raw: String::new(),
            method: Some(Arc::new(method)),
            header,
            claims,
            signature: String::new(),
            valid: false,
        }
    }

    /// Empty shell the parser fills in
    pub(crate) fn unparsed(raw: &str, claims: C) -> Self {
        Self {
            raw: raw.to_string(),
            method: None,
            header: Header::new(),
            claims,
            signature: String::new(),
            valid: false,
        }
    }

    /// Add or replace a header field, e.g. `kid`
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.header.insert(name.into(), value.into());
        self
    }

    /// The `alg` header value
    #[must_use]
    pub fn alg(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// The `kid` header value, for picking a verification key
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.header.get("kid").and_then(Value::as_str)
    }

    /// The signing input: base64url(header) "." base64url(claims)
    ///
    /// # Errors
    /// Returns [`JwtError::Serialization`] if header or claims fail to encode.
    pub fn signing_string(&self) -> JwtResult<String> {
        let header = serde_json::to_vec(&self.header)
            .map_err(|e| JwtError::serialization(e.to_string()))?;
        let claims = serde_json::to_vec(&self.claims)
            .map_err(|e| JwtError::serialization(e.to_string()))?;
        Ok(join_segments(
            &encode_segment(&header),
            &encode_segment(&claims),
        ))
    }

    /// Sign and return the complete compact token
    ///
    /// # Errors
    /// Propagates the signing method's error unchanged (wrong key type,
    /// crypto failure), or a serialization error.
    pub fn signed_string(&self, key: &Key) -> JwtResult<String> {
        let method = self
            .method
            .as_ref()
            .ok_or_else(|| JwtError::signing("token has no signing method"))?;
        let signing_input = self.signing_string()?;
        let signature = method.sign(&signing_input, key)?;
        Ok(join_segments(&signing_input, &encode_segment(&signature)))
    }
}
