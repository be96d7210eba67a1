//! Signed JSON Web Tokens
//!
//! This crate provides:
//! - The compact wire codec (base64url segments joined by dots)
//! - HMAC, RSA, RSA-PSS and ECDSA signing methods behind one trait
//! - A process-wide registry mapping `alg` names to signing methods
//! - Open and registered claims types with time-based validation
//! - A verifying parser that reports every failure as combinable flags
//!
//! ```no_run
//! use signet_jwt::{BoxError, Key, MapClaims, Parser, Token, HS256};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let key = Key::hmac(b"secret".to_vec());
//! let claims = MapClaims::new().with("sub", "alice").with("exp", 4_102_444_800.0);
//! let signed = Token::with_claims(HS256, claims).signed_string(&key)?;
//!
//! let resolver = |_: &Token| -> Result<Option<Key>, BoxError> { Ok(Some(key.clone())) };
//! let token = Parser::new().parse(&signed, Some(&resolver)).into_result()?;
//! assert!(token.valid);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod error;
mod traits;
mod types;
mod validation;

pub use api::algorithms::{
    Curve, Hash, SigningMethodEcdsa, SigningMethodHmac, SigningMethodRsa, SigningMethodRsaPss,
    ES256, ES384, ES512, HS256, HS384, HS512, PS256, PS384, PS512, RS256, RS384, RS512,
};
pub use api::claims::{
    ClaimValue, Claims, JsonNumber, MapClaims, NumberMode, StandardClaims, TimeClaims,
};
pub use api::{
    decode_segment, ec_private_key_from_pem, ec_public_key_from_pem, encode_segment,
    get_signing_method, parse, parse_with_claims, register_signing_method,
    registered_algorithms, rsa_private_key_from_pem, rsa_public_key_from_pem, split_token, Key,
    Keyfunc, MethodConstructor, Parsed, Parser,
};
pub use error::{BoxError, JwtError, JwtResult, ValidationError, ValidationErrorKind};
pub use traits::SigningMethod;
pub use types::{Header, Token};
pub use validation::ValidationOptions;
