//! JWT key material
//!
//! [`Key`] is the value every signing method signs or verifies with. Each
//! method accepts exactly one variant for signing and one for verifying;
//! anything else is an invalid key type.
//!
//! The PEM loaders are thin adapters over the `rsa`, `p256` and `p384`
//! decoders so callers can turn stored key files into [`Key`] values.

use crate::error::{JwtError, JwtResult};
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    RsaPrivateKey, RsaPublicKey,
};
use std::fmt;
use zeroize::Zeroizing;

/// Key material for signing or verification.
#[derive(Clone)]
pub enum Key {
    /// Shared secret for the HMAC family
    Hmac(Zeroizing<Vec<u8>>),
    /// RSA private key (RS*/PS* signing)
    RsaPrivate(RsaPrivateKey),
    /// RSA public key (RS*/PS* verification)
    RsaPublic(RsaPublicKey),
    /// P-256 private key (ES256 signing)
    EcdsaP256Private(p256::ecdsa::SigningKey),
    /// P-256 public key (ES256 verification)
    EcdsaP256Public(p256::ecdsa::VerifyingKey),
    /// P-384 private key (ES384 signing)
    EcdsaP384Private(p384::ecdsa::SigningKey),
    /// P-384 public key (ES384 verification)
    EcdsaP384Public(p384::ecdsa::VerifyingKey),
    /// P-521 private key (ES512 signing)
    EcdsaP521Private(p521::ecdsa::SigningKey),
    /// P-521 public key (ES512 verification)
    EcdsaP521Public(p521::ecdsa::VerifyingKey),
}

impl Key {
    /// Shared HMAC secret from raw bytes
    #[must_use]
    pub fn hmac(secret: impl Into<Vec<u8>>) -> Self {
        Key::Hmac(Zeroizing::new(secret.into()))
    }

    /// Short name of the key type, used in error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Key::Hmac(_) => "hmac secret",
            Key::RsaPrivate(_) => "rsa private key",
            Key::RsaPublic(_) => "rsa public key",
            Key::EcdsaP256Private(_) => "ecdsa p-256 private key",
            Key::EcdsaP256Public(_) => "ecdsa p-256 public key",
            Key::EcdsaP384Private(_) => "ecdsa p-384 private key",
            Key::EcdsaP384Public(_) => "ecdsa p-384 public key",
            Key::EcdsaP521Private(_) => "ecdsa p-521 private key",
            Key::EcdsaP521Public(_) => "ecdsa p-521 public key",
        }
    }
}

// Never print key material.
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.kind()).finish()
    }
}

impl From<RsaPrivateKey> for Key {
    fn from(key: RsaPrivateKey) -> Self {
        Key::RsaPrivate(key)
    }
}

impl From<RsaPublicKey> for Key {
    fn from(key: RsaPublicKey) -> Self {
        Key::RsaPublic(key)
    }
}

impl From<p256::ecdsa::SigningKey> for Key {
    fn from(key: p256::ecdsa::SigningKey) -> Self {
        Key::EcdsaP256Private(key)
    }
}

impl From<p256::ecdsa::VerifyingKey> for Key {
    fn from(key: p256::ecdsa::VerifyingKey) -> Self {
        Key::EcdsaP256Public(key)
    }
}

impl From<p384::ecdsa::SigningKey> for Key {
    fn from(key: p384::ecdsa::SigningKey) -> Self {
        Key::EcdsaP384Private(key)
    }
}

impl From<p384::ecdsa::VerifyingKey> for Key {
    fn from(key: p384::ecdsa::VerifyingKey) -> Self {
        Key::EcdsaP384Public(key)
    }
}

impl From<p521::ecdsa::SigningKey> for Key {
    fn from(key: p521::ecdsa::SigningKey) -> Self {
        Key::EcdsaP521Private(key)
    }
}

impl From<p521::ecdsa::VerifyingKey> for Key {
    fn from(key: p521::ecdsa::VerifyingKey) -> Self {
        Key::EcdsaP521Public(key)
    }
}

/// Parse an RSA private key from PEM (PKCS#1 or PKCS#8)
///
/// # Errors
/// Returns [`JwtError::InvalidKey`] if neither encoding parses.
pub fn rsa_private_key_from_pem(pem: &str) -> JwtResult<Key> {
    RsaPrivateKey::from_pkcs1_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
        .map(Key::RsaPrivate)
        .map_err(|e| JwtError::invalid_key(format!("invalid RSA private key PEM: {e}")))
}

/// Parse an RSA public key from PEM (SPKI or PKCS#1)
///
/// # Errors
/// Returns [`JwtError::InvalidKey`] if neither encoding parses.
pub fn rsa_public_key_from_pem(pem: &str) -> JwtResult<Key> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map(Key::RsaPublic)
        .map_err(|e| JwtError::invalid_key(format!("invalid RSA public key PEM: {e}")))
}

/// Parse a PKCS#8 ECDSA private key (P-256 or P-384) from PEM
///
/// # Errors
/// Returns [`JwtError::InvalidKey`] if the key is not on a supported curve.
pub fn ec_private_key_from_pem(pem: &str) -> JwtResult<Key> {
    if let Ok(key) = p256::ecdsa::SigningKey::from_pkcs8_pem(pem) {
        return Ok(Key::EcdsaP256Private(key));
    }
    p384::ecdsa::SigningKey::from_pkcs8_pem(pem)
        .map(Key::EcdsaP384Private)
        .map_err(|e| JwtError::invalid_key(format!("invalid EC private key PEM: {e}")))
}

/// Parse an SPKI ECDSA public key (P-256 or P-384) from PEM
///
/// # Errors
/// Returns [`JwtError::InvalidKey`] if the key is not on a supported curve.
pub fn ec_public_key_from_pem(pem: &str) -> JwtResult<Key> {
    if let Ok(key) = p256::ecdsa::VerifyingKey::from_public_key_pem(pem) {
        return Ok(Key::EcdsaP256Public(key));
    }
    p384::ecdsa::VerifyingKey::from_public_key_pem(pem)
        .map(Key::EcdsaP384Public)
        .map_err(|e| JwtError::invalid_key(format!("invalid EC public key PEM: {e}")))
}
