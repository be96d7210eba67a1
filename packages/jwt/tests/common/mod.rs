//! Shared key fixtures and helpers for the integration tests

#![allow(dead_code)]

use hex_literal::hex;
use signet_jwt::{
    ec_private_key_from_pem, ec_public_key_from_pem, rsa_private_key_from_pem,
    rsa_public_key_from_pem, Key, Keyfunc, Token,
};

pub const RSA_PRIVATE_PEM: &str = include_str!("../fixtures/rsa_private.pem");
pub const RSA_PRIVATE_PKCS8_PEM: &str = include_str!("../fixtures/rsa_private_pkcs8.pem");
pub const RSA_PUBLIC_PEM: &str = include_str!("../fixtures/rsa_public.pem");
pub const RSA_PUBLIC_PKCS1_PEM: &str = include_str!("../fixtures/rsa_public_pkcs1.pem");
pub const RSA_OTHER_PUBLIC_PEM: &str = include_str!("../fixtures/rsa_other_public.pem");
pub const EC256_PRIVATE_PEM: &str = include_str!("../fixtures/ec256_private.pem");
pub const EC256_PUBLIC_PEM: &str = include_str!("../fixtures/ec256_public.pem");
pub const EC384_PRIVATE_PEM: &str = include_str!("../fixtures/ec384_private.pem");
pub const EC384_PUBLIC_PEM: &str = include_str!("../fixtures/ec384_public.pem");

const P521_PRIVATE: [u8; 66] = hex!(
    "018befd254b3431741dbf7cd2c71e65e1f06188fe3425a8300333e818bbd4d20"
    "3b344fe5d5bc418e56cb6d051d681bef28975a62741df6b510fe5a386dbb28b9"
    "10f7"
);

const P521_PUBLIC: [u8; 133] = hex!(
    "0401e1fbe4afa87d4b67d1ec36a74e6d79db43f407a1e617e03f456738686e0e"
    "c06b1c33882ae32c8b2af0331ef00007facd2068263403ac271dd50010744799"
    "7c1a6d0106b10452966a5c531d17694f67ef31dc3b536b0d3c13758eea22e7e4"
    "46cfe03fe4e640410daee86e419b76ec479c9b170dcd8cabb924245c5e1768bc"
    "cb4a68f758"
);

/// Fixed clock reading used by every time-sensitive test
pub const NOW: i64 = 1_700_000_000;

pub const HMAC_SECRET: &[u8] = b"my-shared-hmac-secret-of-reasonable-length";

pub fn hmac_key() -> Key {
    Key::hmac(HMAC_SECRET)
}

pub fn rsa_private() -> Key {
    rsa_private_key_from_pem(RSA_PRIVATE_PEM).expect("rsa private fixture")
}

pub fn rsa_public() -> Key {
    rsa_public_key_from_pem(RSA_PUBLIC_PEM).expect("rsa public fixture")
}

pub fn rsa_other_public() -> Key {
    rsa_public_key_from_pem(RSA_OTHER_PUBLIC_PEM).expect("rsa other public fixture")
}

pub fn ec256_private() -> Key {
    ec_private_key_from_pem(EC256_PRIVATE_PEM).expect("p-256 private fixture")
}

pub fn ec256_public() -> Key {
    ec_public_key_from_pem(EC256_PUBLIC_PEM).expect("p-256 public fixture")
}

pub fn ec384_private() -> Key {
    ec_private_key_from_pem(EC384_PRIVATE_PEM).expect("p-384 private fixture")
}

pub fn ec384_public() -> Key {
    ec_public_key_from_pem(EC384_PUBLIC_PEM).expect("p-384 public fixture")
}

pub fn ec521_private() -> Key {
    p521::ecdsa::SigningKey::from_slice(&P521_PRIVATE)
        .expect("p-521 private fixture")
        .into()
}

pub fn ec521_public() -> Key {
    p521::ecdsa::VerifyingKey::from_sec1_bytes(&P521_PUBLIC)
        .expect("p-521 public fixture")
        .into()
}

/// Resolver that always hands back `key`
pub fn key_returning<C: 'static>(key: Key) -> Box<Keyfunc<'static, C>> {
    Box::new(move |_: &Token<C>| Ok(Some(key.clone())))
}
