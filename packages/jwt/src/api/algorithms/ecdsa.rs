//! ECDSA-based JWT Algorithm Implementations
//!
//! ES256 (P-256/SHA-256), ES384 (P-384/SHA-384) and ES512 (P-521/SHA-512).
//! Signatures travel as fixed-width `r || s`, each half padded to the
//! curve's coordinate size.

use crate::{
    api::keys::Key,
    error::{JwtError, JwtResult},
    traits::SigningMethod,
};
use p256::ecdsa::signature::{Signer, Verifier};

/// Curve an ECDSA signing method is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// NIST P-256
    P256,
    /// NIST P-384
    P384,
    /// NIST P-521
    P521,
}

impl Curve {
    /// Coordinate size in bytes
    #[must_use]
    pub const fn key_size(self) -> usize {
        match self {
            Curve::P256 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
        }
    }

    /// Width of an encoded `r || s` signature
    #[must_use]
    pub const fn signature_len(self) -> usize {
        self.key_size() * 2
    }
}

/// ECDSA signing method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningMethodEcdsa {
    name: &'static str,
    curve: Curve,
}

/// ECDSA using P-256 and SHA-256
pub const ES256: SigningMethodEcdsa = SigningMethodEcdsa::new("ES256", Curve::P256);
/// ECDSA using P-384 and SHA-384
pub const ES384: SigningMethodEcdsa = SigningMethodEcdsa::new("ES384", Curve::P384);
/// ECDSA using P-521 and SHA-512
pub const ES512: SigningMethodEcdsa = SigningMethodEcdsa::new("ES512", Curve::P521);

impl SigningMethodEcdsa {
    /// Bind an algorithm name to a curve
    #[must_use]
    pub const fn new(name: &'static str, curve: Curve) -> Self {
        Self { name, curve }
    }

    /// Curve this method is bound to
    #[must_use]
    pub fn curve(&self) -> Curve {
        self.curve
    }

    fn wrong_key(&self, expected: &'static str, key: &Key) -> JwtError {
        JwtError::InvalidKeyType {
            alg: self.name.to_string(),
            expected,
            actual: key.kind(),
        }
    }
}

fn signing_failed(e: p256::ecdsa::Error) -> JwtError {
    JwtError::signing(format!("ECDSA signing failed: {e}"))
}

impl SigningMethod for SigningMethodEcdsa {
    fn alg(&self) -> &str {
        self.name
    }

    fn sign(&self, signing_input: &str, key: &Key) -> JwtResult<Vec<u8>> {
        let msg = signing_input.as_bytes();
        match (self.curve, key) {
            (Curve::P256, Key::EcdsaP256Private(k)) => {
                let sig: p256::ecdsa::Signature = k.try_sign(msg).map_err(signing_failed)?;
                Ok(sig.to_bytes().to_vec())
            }
            (Curve::P384, Key::EcdsaP384Private(k)) => {
                let sig: p384::ecdsa::Signature = k.try_sign(msg).map_err(signing_failed)?;
                Ok(sig.to_bytes().to_vec())
            }
            (Curve::P521, Key::EcdsaP521Private(k)) => {
                let sig: p521::ecdsa::Signature = k.try_sign(msg).map_err(signing_failed)?;
                Ok(sig.to_bytes().to_vec())
            }
            (Curve::P256, other) => Err(self.wrong_key("ecdsa p-256 private key", other)),
            (Curve::P384, other) => Err(self.wrong_key("ecdsa p-384 private key", other)),
            (Curve::P521, other) => Err(self.wrong_key("ecdsa p-521 private key", other)),
        }
    }

    fn verify(&self, signing_input: &str, signature: &[u8], key: &Key) -> JwtResult<()> {
        // Key type is checked before the signature shape.
        let expected = match (self.curve, key) {
            (Curve::P256, Key::EcdsaP256Public(_))
            | (Curve::P384, Key::EcdsaP384Public(_))
            | (Curve::P521, Key::EcdsaP521Public(_)) => self.curve.signature_len(),
            (Curve::P256, other) => return Err(self.wrong_key("ecdsa p-256 public key", other)),
            (Curve::P384, other) => return Err(self.wrong_key("ecdsa p-384 public key", other)),
            (Curve::P521, other) => return Err(self.wrong_key("ecdsa p-521 public key", other)),
        };
        if signature.len() != expected {
            return Err(JwtError::InvalidSignatureLength {
                expected,
                actual: signature.len(),
            });
        }

        let msg = signing_input.as_bytes();
        let verified = match key {
            Key::EcdsaP256Public(k) => p256::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| k.verify(msg, &sig)),
            Key::EcdsaP384Public(k) => p384::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| k.verify(msg, &sig)),
            Key::EcdsaP521Public(k) => p521::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| k.verify(msg, &sig)),
            _ => return Err(JwtError::SignatureInvalid),
        };
        verified.map_err(|_| JwtError::SignatureInvalid)
    }
}
