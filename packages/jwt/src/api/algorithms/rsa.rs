//! RSA-based JWT Algorithm Implementations
//!
//! RS256/384/512 use PKCS#1 v1.5 padding; PS256/384/512 use PSS with a salt
//! as long as the hash output. Signing takes an RSA private key, verifying an
//! RSA public key.

use super::Hash;
use crate::{
    api::keys::Key,
    error::{JwtError, JwtResult},
    traits::SigningMethod,
};
use rsa::rand_core::OsRng;
use rsa::sha2::{Digest, Sha256, Sha384, Sha512};
use rsa::{Pkcs1v15Sign, Pss, RsaPrivateKey, RsaPublicKey};

/// RSA PKCS#1 v1.5 signing method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningMethodRsa {
    name: &'static str,
    hash: Hash,
}

/// RSASSA-PKCS1-v1_5 using SHA-256
pub const RS256: SigningMethodRsa = SigningMethodRsa::new("RS256", Hash::Sha256);
/// RSASSA-PKCS1-v1_5 using SHA-384
pub const RS384: SigningMethodRsa = SigningMethodRsa::new("RS384", Hash::Sha384);
/// RSASSA-PKCS1-v1_5 using SHA-512
pub const RS512: SigningMethodRsa = SigningMethodRsa::new("RS512", Hash::Sha512);

/// RSA PSS signing method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningMethodRsaPss {
    name: &'static str,
    hash: Hash,
}

/// RSASSA-PSS using SHA-256
pub const PS256: SigningMethodRsaPss = SigningMethodRsaPss::new("PS256", Hash::Sha256);
/// RSASSA-PSS using SHA-384
pub const PS384: SigningMethodRsaPss = SigningMethodRsaPss::new("PS384", Hash::Sha384);
/// RSASSA-PSS using SHA-512
pub const PS512: SigningMethodRsaPss = SigningMethodRsaPss::new("PS512", Hash::Sha512);

fn private_key<'k>(alg: &str, key: &'k Key) -> JwtResult<&'k RsaPrivateKey> {
    match key {
        Key::RsaPrivate(k) => Ok(k),
        other => Err(JwtError::InvalidKeyType {
            alg: alg.to_string(),
            expected: "rsa private key",
            actual: other.kind(),
        }),
    }
}

fn public_key<'k>(alg: &str, key: &'k Key) -> JwtResult<&'k RsaPublicKey> {
    match key {
        Key::RsaPublic(k) => Ok(k),
        other => Err(JwtError::InvalidKeyType {
            alg: alg.to_string(),
            expected: "rsa public key",
            actual: other.kind(),
        }),
    }
}

fn signing_failed(e: rsa::Error) -> JwtError {
    JwtError::signing(format!("RSA signing failed: {e}"))
}

// Padding schemes sign a pre-hashed message.
fn hashed(hash: Hash, msg: &[u8]) -> Vec<u8> {
    match hash {
        Hash::Sha256 => Sha256::digest(msg).to_vec(),
        Hash::Sha384 => Sha384::digest(msg).to_vec(),
        Hash::Sha512 => Sha512::digest(msg).to_vec(),
    }
}

fn pkcs1v15(hash: Hash) -> Pkcs1v15Sign {
    match hash {
        Hash::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        Hash::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        Hash::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}

fn pss(hash: Hash) -> Pss {
    match hash {
        Hash::Sha256 => Pss::new::<Sha256>(),
        Hash::Sha384 => Pss::new::<Sha384>(),
        Hash::Sha512 => Pss::new::<Sha512>(),
    }
}

impl SigningMethodRsa {
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
}

impl SigningMethod for SigningMethodRsa {
    fn alg(&self) -> &str {
        self.name
    }

    fn sign(&self, signing_input: &str, key: &Key) -> JwtResult<Vec<u8>> {
        let key = private_key(self.name, key)?;
        let digest = hashed(self.hash, signing_input.as_bytes());
        key.sign(pkcs1v15(self.hash), &digest)
            .map_err(signing_failed)
    }

    fn verify(&self, signing_input: &str, signature: &[u8], key: &Key) -> JwtResult<()> {
        let key = public_key(self.name, key)?;
        let digest = hashed(self.hash, signing_input.as_bytes());
        key.verify(pkcs1v15(self.hash), &digest, signature)
            .map_err(|_| JwtError::SignatureInvalid)
    }
}

impl SigningMethodRsaPss {
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
}

impl SigningMethod for SigningMethodRsaPss {
    fn alg(&self) -> &str {
        self.name
    }

    fn sign(&self, signing_input: &str, key: &Key) -> JwtResult<Vec<u8>> {
        let key = private_key(self.name, key)?;
        let digest = hashed(self.hash, signing_input.as_bytes());
        key.sign_with_rng(&mut OsRng, pss(self.hash), &digest)
            .map_err(signing_failed)
    }

    fn verify(&self, signing_input: &str, signature: &[u8], key: &Key) -> JwtResult<()> {
        let key = public_key(self.name, key)?;
        let digest = hashed(self.hash, signing_input.as_bytes());
        key.verify(pss(self.hash), &digest, signature)
            .map_err(|_| JwtError::SignatureInvalid)
    }
}
