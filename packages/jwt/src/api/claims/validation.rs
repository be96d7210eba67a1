//! Time-based claim checks shared by every claims type
//!
//! `leeway` widens each window by that many seconds; zero means exact
//! comparison against `now`.

use crate::error::{ValidationError, ValidationErrorKind};

/// `exp`, `nbf` and `iat` as whole Unix seconds, `None` when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeClaims {
    /// Expiration time
    pub expires_at: Option<i64>,
    /// Not-before time
    pub not_before: Option<i64>,
    /// Issued-at time
    pub issued_at: Option<i64>,
}

/// A token is expired once `now` reaches `exp`.
#[inline]
#[must_use]
pub fn verify_exp(exp: Option<i64>, now: i64, leeway: i64, required: bool) -> bool {
    exp.map_or(!required, |exp| now.saturating_sub(leeway) < exp)
}

/// A token is usable from `nbf` onward.
#[inline]
#[must_use]
pub fn verify_nbf(nbf: Option<i64>, now: i64, leeway: i64, required: bool) -> bool {
    nbf.map_or(!required, |nbf| nbf <= now.saturating_add(leeway))
}

/// A token cannot be issued in the future.
#[inline]
#[must_use]
pub fn verify_iat(iat: Option<i64>, now: i64, leeway: i64, required: bool) -> bool {
    iat.map_or(!required, |iat| iat <= now.saturating_add(leeway))
}

/// Fold `next` into an accumulator of violations from one call.
pub(crate) fn accumulate(acc: &mut Option<ValidationError>, next: ValidationError) {
    match acc {
        Some(existing) => existing.merge(next),
        None => *acc = Some(next),
    }
}

/// Check all three time claims, reporting every violation at once.
///
/// # Errors
/// Returns a [`ValidationError`] carrying `EXPIRED`, `NOT_VALID_YET` and/or
/// `ISSUED_AT`.
pub fn validate_time_claims(
    times: TimeClaims,
    now: i64,
    leeway: i64,
) -> Result<(), ValidationError> {
    let mut violations = None;

    if !verify_exp(times.expires_at, now, leeway, false) {
        let by = times.expires_at.map_or(0, |exp| now.saturating_sub(exp));
        accumulate(
            &mut violations,
            ValidationError::new(
                format!("token is expired by {by}s"),
                ValidationErrorKind::EXPIRED,
            ),
        );
    }

    if !verify_iat(times.issued_at, now, leeway, false) {
        accumulate(
            &mut violations,
            ValidationError::new("token used before issued", ValidationErrorKind::ISSUED_AT),
        );
    }

    if !verify_nbf(times.not_before, now, leeway, false) {
        accumulate(
            &mut violations,
            ValidationError::new("token is not valid yet", ValidationErrorKind::NOT_VALID_YET),
        );
    }

    violations.map_or(Ok(()), Err)
}
