//! JWT validation options and configuration.

use crate::api::claims::NumberMode;
use chrono::Duration;

/// Parser configuration.
///
/// Every field is independent; the default accepts any registered algorithm,
/// decodes numbers as floats, validates time claims with no leeway, and
/// checks neither audience nor issuer.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Accepted `alg` values. `None` accepts anything registered.
    pub valid_methods: Option<Vec<String>>,
    /// Decode open-claims numbers as exact decimal text.
    pub use_json_number: bool,
    /// Skip claims validation entirely.
    pub skip_claims_validation: bool,
    /// Leeway for time-based claims.
    pub leeway: Duration,
    /// Expected audience.
    pub expected_audience: Option<String>,
    /// Expected issuer.
    pub expected_issuer: Option<String>,
}

impl ValidationOptions {
    /// Default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set allowed algorithms.
    #[must_use]
    pub fn valid_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    /// Keep open-claims numbers as exact decimal text.
    #[must_use]
    pub fn use_json_number(mut self, enabled: bool) -> Self {
        self.use_json_number = enabled;
        self
    }

    /// Skip claims validation.
    #[must_use]
    pub fn skip_claims_validation(mut self, skip: bool) -> Self {
        self.skip_claims_validation = skip;
        self
    }

    /// Set the time leeway for validation.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Set expected audience.
    #[must_use]
    pub fn expect_audience(mut self, audience: impl Into<String>) -> Self {
        self.expected_audience = Some(audience.into());
        self
    }

    /// Set expected issuer.
    #[must_use]
    pub fn expect_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = Some(issuer.into());
        self
    }

    /// Number decoding mode implied by `use_json_number`
    #[must_use]
    pub fn number_mode(&self) -> NumberMode {
        if self.use_json_number {
            NumberMode::Decimal
        } else {
            NumberMode::Float
        }
    }

    /// True if `alg` passes the whitelist
    #[must_use]
    pub fn allows(&self, alg: &str) -> bool {
        self.valid_methods
            .as_ref()
            .map_or(true, |methods| methods.iter().any(|m| m == alg))
    }
}
