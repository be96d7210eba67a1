//! Core signing-method trait.

use crate::{api::keys::Key, error::JwtResult};
use std::fmt::Debug;
use std::sync::Arc;

/// Signing algorithm interface.
///
/// Implementations receive the signing input (the base64url header and
/// claims joined by a dot) and never the decoded JSON. They must be
/// thread-safe (Send + Sync) since one instance serves every token.
pub trait SigningMethod: Debug + Send + Sync {
    /// Header `alg` value.
    fn alg(&self) -> &str;

    /// Sign the signing input with `key`, returning raw signature bytes.
    ///
    /// # Errors
    /// Returns an invalid-key error if `key` is not the type this method
    /// signs with, or a signing error if the crypto library fails.
    fn sign(&self, signing_input: &str, key: &Key) -> JwtResult<Vec<u8>>;

    /// Verify raw signature bytes over the signing input.
    ///
    /// # Errors
    /// Returns an invalid-key error for the wrong key type and
    /// [`crate::JwtError::SignatureInvalid`] when the check fails.
    fn verify(&self, signing_input: &str, signature: &[u8], key: &Key) -> JwtResult<()>;
}

/// Implementation of `SigningMethod` for `Arc<T>` to allow shared ownership.
impl<T: SigningMethod + ?Sized> SigningMethod for Arc<T> {
    fn alg(&self) -> &str {
        (**self).alg()
    }

    fn sign(&self, signing_input: &str, key: &Key) -> JwtResult<Vec<u8>> {
        (**self).sign(signing_input, key)
    }

    fn verify(&self, signing_input: &str, signature: &[u8], key: &Key) -> JwtResult<()> {
        (**self).verify(signing_input, signature, key)
    }
}
