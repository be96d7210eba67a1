//! Token parsing and verification
//!
//! The verify path runs in a fixed order: split and decode, resolve the
//! signing method, resolve the key, verify the signature, validate claims.
//! Structural, method and key failures stop the pipeline; signature and
//! claims failures are both reported in the same [`ValidationError`].

use crate::api::algorithms::utils::{decode_segment, join_segments, split_token};
use crate::api::claims::validation::accumulate;
use crate::api::claims::{Claims, MapClaims};
use crate::api::keys::Key;
use crate::api::registry::get_signing_method;
use crate::error::{BoxError, JwtError, ValidationError, ValidationErrorKind};
use crate::types::{Header, Token};
use crate::validation::ValidationOptions;
use std::fmt;
use std::sync::Arc;

/// Key resolver: picks the verification key for an unverified token.
///
/// `Ok(None)` means no usable key and fails the parse as unverifiable.
/// The resolver may borrow from its environment for `'a`.
pub type Keyfunc<'a, C> = dyn Fn(&Token<C>) -> Result<Option<Key>, BoxError> + 'a;

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Outcome of a verifying parse.
///
/// The token is always present, populated as far as the pipeline got.
#[derive(Debug)]
pub struct Parsed<C = MapClaims> {
    /// The farthest-constructed token
    pub token: Token<C>,
    /// Why the token was rejected, `None` iff `token.valid`
    pub error: Option<ValidationError>,
}

impl<C> Parsed<C> {
    /// True if verification succeeded
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Convert to a `Result`, dropping the partial token on failure.
    ///
    /// # Errors
    /// Returns the [`ValidationError`] if the token was rejected.
    pub fn into_result(self) -> Result<Token<C>, ValidationError> {
        match self.error {
            None => Ok(self.token),
            Some(err) => Err(err),
        }
    }
}

/// Configurable token parser.
#[derive(Clone, Default)]
pub struct Parser {
    options: ValidationOptions,
    clock: Option<Clock>,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("options", &self.options)
            .field("clock", &self.clock.as_ref().map(|_| "custom"))
            .finish()
    }
}

impl Parser {
    /// Parser with default options and the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser with the given options
    #[must_use]
    pub fn with_options(options: ValidationOptions) -> Self {
        Self {
            options,
            clock: None,
        }
    }

    /// Replace the clock used for claims validation (Unix seconds).
    #[must_use]
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Current options
    #[must_use]
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    fn now(&self) -> i64 {
        match &self.clock {
            Some(clock) => clock(),
            None => chrono::Utc::now().timestamp(),
        }
    }

    /// Decode a token without checking its signature, algorithm or claims.
    ///
    /// Returns the token and its signing input. The signing method is not
    /// attached; only the `alg` header is available.
    ///
    /// # Errors
    /// Fails with `MALFORMED` on a bad segment count, bad base64url or JSON
    /// that does not decode into the header or `C`.
    pub fn parse_unverified<C: Claims>(
        &self,
        token: &str,
        claims: C,
    ) -> Result<(Token<C>, String), ValidationError> {
        let mut parsed = Token::unparsed(token, claims);
        let (signing_input, _) = self.decode_into(&mut parsed)?;
        Ok((parsed, signing_input))
    }

    fn decode_into<C: Claims>(
        &self,
        token: &mut Token<C>,
    ) -> Result<(String, String), ValidationError> {
        let [header_b64, claims_b64, signature_b64] = split_token(&token.raw)?;

        let header_json = decode_segment(header_b64)?;
        token.header = serde_json::from_slice::<Header>(&header_json).map_err(|e| {
            ValidationError::new("could not decode header JSON", ValidationErrorKind::MALFORMED)
                .with_inner(e)
        })?;

        let claims_json = decode_segment(claims_b64)?;
        token.claims = C::decode(&claims_json, self.options.number_mode()).map_err(|e| {
            ValidationError::new("could not decode claims JSON", ValidationErrorKind::MALFORMED)
                .with_inner(e)
        })?;

        Ok((
            join_segments(header_b64, claims_b64),
            signature_b64.to_string(),
        ))
    }

    /// Parse and fully verify a token into claims of type `C`.
    ///
    /// `claims` is the decode target; it stays in the token unchanged if
    /// the claims segment is never reached.
    pub fn parse_with_claims<C: Claims>(
        &self,
        token: &str,
        claims: C,
        key_fn: Option<&Keyfunc<'_, C>>,
    ) -> Parsed<C> {
        let mut token = Token::unparsed(token, claims);
        match self.verify(&mut token, key_fn) {
            Ok(()) => {
                token.valid = true;
                tracing::trace!(alg = ?token.alg(), "token verified");
                Parsed { token, error: None }
            }
            Err(err) => {
                tracing::debug!(alg = ?token.alg(), flags = ?err.errors(), "token rejected");
                Parsed {
                    token,
                    error: Some(err),
                }
            }
        }
    }

    /// Parse and verify a token with open claims.
    pub fn parse(
        &self,
        token: &str,
        key_fn: Option<&Keyfunc<'_, MapClaims>>,
    ) -> Parsed<MapClaims> {
        self.parse_with_claims(token, MapClaims::new(), key_fn)
    }

    fn verify<C: Claims>(
        &self,
        token: &mut Token<C>,
        key_fn: Option<&Keyfunc<'_, C>>,
    ) -> Result<(), ValidationError> {
        let (signing_input, signature) = self.decode_into(token)?;

        let method = token
            .alg()
            .filter(|alg| self.options.allows(alg))
            .and_then(get_signing_method)
            .ok_or_else(|| {
                ValidationError::new(
                    "signing method (alg) is unavailable",
                    ValidationErrorKind::SIGNATURE_INVALID,
                )
            })?;
        token.method = Some(Arc::clone(&method));

        let key = resolve_key(token, key_fn)?;

        let mut violations = None;

        token.signature = signature;
        let verified = decode_segment(&token.signature)
            .map_err(|e| (ValidationErrorKind::MALFORMED, e))
            .and_then(|bytes| {
                method
                    .verify(&signing_input, &bytes, &key)
                    .map_err(|e| (e.validation_flags(), e))
            });
        if let Err((flags, cause)) = verified {
            let err = ValidationError::new(
                "signature is invalid",
                ValidationErrorKind::SIGNATURE_INVALID | flags,
            );
            let err = match cause {
                JwtError::SignatureInvalid => err,
                other => err.with_inner(other),
            };
            accumulate(&mut violations, err);
        }

        if !self.options.skip_claims_validation {
            let leeway = self.options.leeway.num_seconds();
            if let Err(err) = token.claims.validate(self.now(), leeway) {
                accumulate(&mut violations, err);
            }
        }

        if let Some(aud) = &self.options.expected_audience {
            if !token.claims.verify_audience(aud, true) {
                accumulate(
                    &mut violations,
                    ValidationError::new(
                        "token has invalid audience",
                        ValidationErrorKind::AUDIENCE,
                    ),
                );
            }
        }
        if let Some(iss) = &self.options.expected_issuer {
            if !token.claims.verify_issuer(iss, true) {
                accumulate(
                    &mut violations,
                    ValidationError::new("token has invalid issuer", ValidationErrorKind::ISSUER),
                );
            }
        }

        violations.map_or(Ok(()), Err)
    }
}

fn resolve_key<C>(
    token: &Token<C>,
    key_fn: Option<&Keyfunc<'_, C>>,
) -> Result<Key, ValidationError> {
    let unverifiable = |text: &str| ValidationError::new(text, ValidationErrorKind::UNVERIFIABLE);
    let Some(key_fn) = key_fn else {
        return Err(unverifiable("no key resolver was provided"));
    };
    match key_fn(token) {
        Ok(Some(key)) => Ok(key),
        Ok(None) => Err(unverifiable("key resolver returned no key")),
        Err(e) => Err(unverifiable("error while resolving key").with_boxed_inner(e)),
    }
}

/// Verify a token with open claims using default options.
pub fn parse(token: &str, key_fn: Option<&Keyfunc<'_, MapClaims>>) -> Parsed<MapClaims> {
    Parser::default().parse(token, key_fn)
}

/// Verify a token into claims of type `C` using default options.
pub fn parse_with_claims<C: Claims>(
    token: &str,
    claims: C,
    key_fn: Option<&Keyfunc<'_, C>>,
) -> Parsed<C> {
    Parser::default().parse_with_claims(token, claims, key_fn)
}
