//! Key loading from PEM

mod common;

use common::*;
use signet_jwt::{
    ec_private_key_from_pem, ec_public_key_from_pem, rsa_private_key_from_pem,
    rsa_public_key_from_pem, JwtError, Key, SigningMethod, ES384, RS256,
};

#[test]
fn test_rsa_private_key_encodings_agree() {
    let pkcs1 = rsa_private_key_from_pem(RSA_PRIVATE_PEM).expect("pkcs1");
    let pkcs8 = rsa_private_key_from_pem(RSA_PRIVATE_PKCS8_PEM).expect("pkcs8");

    let a = RS256.sign("input", &pkcs1).expect("sign");
    let b = RS256.sign("input", &pkcs8).expect("sign");
    assert_eq!(a, b);
}

#[test]
fn test_rsa_public_key_encodings_verify() {
    let signature = RS256.sign("input", &rsa_private()).expect("sign");

    for pem in [RSA_PUBLIC_PEM, RSA_PUBLIC_PKCS1_PEM] {
        let key = rsa_public_key_from_pem(pem).expect("public key");
        assert!(matches!(key, Key::RsaPublic(_)));
        RS256.verify("input", &signature, &key).expect("verify");
    }
}

#[test]
fn test_ec_keys_detect_curve() {
    assert!(matches!(ec256_private(), Key::EcdsaP256Private(_)));
    assert!(matches!(ec256_public(), Key::EcdsaP256Public(_)));
    assert!(matches!(ec384_private(), Key::EcdsaP384Private(_)));
    assert!(matches!(ec384_public(), Key::EcdsaP384Public(_)));

    let signature = ES384.sign("input", &ec384_private()).expect("sign");
    ES384.verify("input", &signature, &ec384_public()).expect("verify");
}

#[test]
fn test_pem_loaders_reject_wrong_material() {
    assert!(matches!(
        rsa_private_key_from_pem(RSA_PUBLIC_PEM),
        Err(JwtError::InvalidKey(_))
    ));
    assert!(matches!(
        rsa_public_key_from_pem(EC256_PUBLIC_PEM),
        Err(JwtError::InvalidKey(_))
    ));
    assert!(matches!(
        ec_private_key_from_pem(RSA_PRIVATE_PKCS8_PEM),
        Err(JwtError::InvalidKey(_))
    ));
    assert!(matches!(
        ec_public_key_from_pem("not a pem"),
        Err(JwtError::InvalidKey(_))
    ));
}

#[test]
fn test_debug_never_prints_key_material() {
    let secret = Key::hmac(b"super-secret-value".to_vec());
    let printed = format!("{secret:?}");

    assert_eq!(printed, r#"Key("hmac secret")"#);
    assert!(!format!("{:?}", rsa_private()).contains("RsaPrivateKey"));
}
