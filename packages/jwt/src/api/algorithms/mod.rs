//! JWT Algorithms Module
//!
//! Signing methods grouped by family. Each size variant is a constant bound
//! to one hash (and for ECDSA, one curve); the registry seeds itself from
//! these constants.

mod ecdsa;
mod hmac;
mod rsa;
pub(crate) mod utils;

pub use ecdsa::{Curve, SigningMethodEcdsa, ES256, ES384, ES512};
pub use hmac::{SigningMethodHmac, HS256, HS384, HS512};
pub use rsa::{SigningMethodRsa, SigningMethodRsaPss, PS256, PS384, PS512, RS256, RS384, RS512};

/// Hash function a signing method is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hash {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}
