//! HMAC-based JWT Algorithm Implementations
//!
//! HS256, HS384 and HS512 over a shared byte secret. Verification recomputes
//! the MAC and compares it in constant time.

use super::Hash;
use crate::{
    api::keys::Key,
    error::{JwtError, JwtResult},
    traits::SigningMethod,
};
use hmac::{digest::KeyInit, Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// HMAC-SHA signing method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningMethodHmac {
    name: &'static str,
    hash: Hash,
}

/// HMAC using SHA-256
pub const HS256: SigningMethodHmac = SigningMethodHmac::new("HS256", Hash::Sha256);
/// HMAC using SHA-384
pub const HS384: SigningMethodHmac = SigningMethodHmac::new("HS384", Hash::Sha384);
/// HMAC using SHA-512
pub const HS512: SigningMethodHmac = SigningMethodHmac::new("HS512", Hash::Sha512);

impl SigningMethodHmac {
    /// Bind an algorithm name to a hash
    #[must_use]
    pub const fn new(name: &'static str, hash: Hash) -> Self {
        Self { name, hash }
    }

    /// Hash this method is bound to
    #[must_use]
    pub fn hash(&self) -> Hash {
        self.hash
    }

    fn secret<'k>(&self, key: &'k Key) -> JwtResult<&'k [u8]> {
        match key {
            Key::Hmac(secret) => Ok(secret.as_slice()),
            other => Err(JwtError::InvalidKeyType {
                alg: self.name.to_string(),
                expected: "hmac secret",
                actual: other.kind(),
            }),
        }
    }
}

fn compute<M: Mac + KeyInit>(secret: &[u8], input: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|_| JwtError::invalid_key("invalid HMAC key length"))?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn check<M: Mac + KeyInit>(secret: &[u8], input: &[u8], signature: &[u8]) -> JwtResult<()> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|_| JwtError::invalid_key("invalid HMAC key length"))?;
    mac.update(input);
    mac.verify_slice(signature)
        .map_err(|_| JwtError::SignatureInvalid)
}

impl SigningMethod for SigningMethodHmac {
    fn alg(&self) -> &str {
        self.name
    }

    fn sign(&self, signing_input: &str, key: &Key) -> JwtResult<Vec<u8>> {
        let secret = self.secret(key)?;
        let input = signing_input.as_bytes();
        match self.hash {
            Hash::Sha256 => compute::<HmacSha256>(secret, input),
            Hash::Sha384 => compute::<HmacSha384>(secret, input),
            Hash::Sha512 => compute::<HmacSha512>(secret, input),
        }
    }

    fn verify(&self, signing_input: &str, signature: &[u8], key: &Key) -> JwtResult<()> {
        let secret = self.secret(key)?;
        let input = signing_input.as_bytes();
        match self.hash {
            Hash::Sha256 => check::<HmacSha256>(secret, input, signature),
            Hash::Sha384 => check::<HmacSha384>(secret, input, signature),
            Hash::Sha512 => check::<HmacSha512>(secret, input, signature),
        }
    }
}
