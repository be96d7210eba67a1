//! Token API
//!
//! Split by concern: the codec and signing methods live in [`algorithms`],
//! payload types in [`claims`], key material in [`keys`], name lookup in
//! [`registry`] and the verify pipeline in [`parser`].

pub mod algorithms;
pub mod claims;
pub mod keys;
pub mod parser;
pub mod registry;

pub use algorithms::utils::{decode_segment, encode_segment, split_token};
pub use keys::{
    ec_private_key_from_pem, ec_public_key_from_pem, rsa_private_key_from_pem,
    rsa_public_key_from_pem, Key,
};
pub use parser::{parse, parse_with_claims, Keyfunc, Parsed, Parser};
pub use registry::{
    get_signing_method, register_signing_method, registered_algorithms, MethodConstructor,
};
