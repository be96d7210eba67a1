//! Claims model and time validation

use signet_jwt::{
    ClaimValue, Claims, JsonNumber, MapClaims, NumberMode, StandardClaims, TimeClaims,
    ValidationError, ValidationErrorKind,
};
use std::error::Error as _;

const NOW: i64 = 1_700_000_000;

fn kinds(result: Result<(), ValidationError>) -> ValidationErrorKind {
    result.err().map(|e| e.errors()).unwrap_or(ValidationErrorKind::empty())
}

#[test]
fn test_map_claims_time_helpers() {
    let claims = MapClaims::new()
        .with("exp", (NOW + 10) as f64)
        .with("nbf", (NOW - 10) as f64);

    assert!(claims.verify_expires_at(NOW, true));
    assert!(!claims.verify_expires_at(NOW + 10, true));
    assert!(claims.verify_not_before(NOW, true));
    assert!(!claims.verify_not_before(NOW - 11, true));

    // Absent claims pass only when not required.
    assert!(claims.verify_issued_at(NOW, false));
    assert!(!claims.verify_issued_at(NOW, true));
}

#[test]
fn test_map_claims_validate_reports_every_violation() {
    let claims = MapClaims::new()
        .with("exp", (NOW - 1) as f64)
        .with("nbf", (NOW + 1) as f64)
        .with("iat", (NOW + 1) as f64);

    assert_eq!(
        kinds(claims.validate(NOW, 0)),
        ValidationErrorKind::EXPIRED
            | ValidationErrorKind::NOT_VALID_YET
            | ValidationErrorKind::ISSUED_AT
    );
    assert_eq!(kinds(claims.validate(NOW, 5)), ValidationErrorKind::empty());
}

#[test]
fn test_map_claims_without_time_claims_is_valid() {
    let claims = MapClaims::new().with("sub", "alice");
    assert_eq!(kinds(claims.validate(NOW, 0)), ValidationErrorKind::empty());
}

#[test]
fn test_decimal_text_timestamps() {
    let claims = MapClaims::new()
        .with("exp", JsonNumber::new("1700000001"))
        .with("nbf", JsonNumber::new("1.6e9"));

    assert_eq!(claims.timestamp("exp").ok().flatten(), Some(NOW + 1));
    assert_eq!(claims.timestamp("nbf").ok().flatten(), Some(1_600_000_000));
    assert_eq!(kinds(claims.validate(NOW, 0)), ValidationErrorKind::empty());
}

#[test]
fn test_unparseable_decimal_text_is_malformed() {
    let claims = MapClaims::new()
        .with("exp", JsonNumber::new("soon"))
        .with("nbf", (NOW + 100) as f64);

    let err = claims.validate(NOW, 0).expect_err("bad exp");
    assert!(err.is(ValidationErrorKind::MALFORMED));
    // Other claims are still checked.
    assert!(err.is(ValidationErrorKind::NOT_VALID_YET));
    assert!(!claims.verify_expires_at(NOW, false));
}

#[test]
fn test_non_number_time_claim_is_malformed() {
    let claims = MapClaims::new().with("iat", true);
    assert_eq!(kinds(claims.validate(NOW, 0)), ValidationErrorKind::MALFORMED);
}

#[test]
fn test_number_modes_decode() {
    let json = br#"{"exp":1700000000,"ratio":1.50,"big":123456789012345678901234567890,"nested":{"n":2}}"#;

    let float = MapClaims::from_json_slice(json, NumberMode::Float).expect("object");
    assert_eq!(float.get("exp"), Some(&ClaimValue::Float(1_700_000_000.0)));
    assert_eq!(float.get("ratio"), Some(&ClaimValue::Float(1.5)));

    let decimal = MapClaims::from_json_slice(json, NumberMode::Decimal).expect("object");
    assert_eq!(
        decimal.get("exp"),
        Some(&ClaimValue::Number(JsonNumber::new("1700000000")))
    );
    assert_eq!(
        decimal.get("ratio"),
        Some(&ClaimValue::Number(JsonNumber::new("1.50")))
    );
    match decimal.get("nested") {
        Some(ClaimValue::Object(inner)) => {
            assert_eq!(inner.get("n"), Some(&ClaimValue::Number(JsonNumber::new("2"))));
        }
        other => panic!("expected object, got {other:?}"),
    }
}

#[test]
fn test_decimal_text_survives_reencoding() {
    let json = br#"{"big":123456789012345678901234567890}"#;
    let claims = MapClaims::from_json_slice(json, NumberMode::Decimal).expect("object");

    let encoded = serde_json::to_string(&claims).expect("encode");
    assert_eq!(encoded, r#"{"big":123456789012345678901234567890}"#);
}

#[test]
fn test_map_claims_must_be_object() {
    assert!(MapClaims::from_json_slice(b"[1,2]", NumberMode::Float).is_err());
    assert!(serde_json::from_str::<MapClaims>("\"claims\"").is_err());
}

#[test]
fn test_map_claims_audience_and_issuer() {
    let single = MapClaims::new().with("aud", "api").with("iss", "auth");
    assert!(single.verify_audience("api", true));
    assert!(!single.verify_audience("web", true));
    assert!(single.verify_issuer("auth", true));
    assert!(!single.verify_issuer("other", false));

    let many = MapClaims::new().with("aud", vec![ClaimValue::from("api"), ClaimValue::from("web")]);
    assert!(many.verify_audience("web", true));
    assert!(!many.verify_audience("admin", false));

    let empty = MapClaims::new().with("aud", "");
    assert!(empty.verify_audience("api", false));
    assert!(!empty.verify_audience("api", true));
    assert!(!MapClaims::new().verify_issuer("auth", true));
}

#[test]
fn test_standard_claims_serialization_skips_absent() {
    let claims = StandardClaims {
        subject: "alice".to_string(),
        expires_at: NOW,
        ..StandardClaims::default()
    };
    assert_eq!(
        serde_json::to_string(&claims).expect("encode"),
        r#"{"exp":1700000000,"sub":"alice"}"#
    );

    let decoded: StandardClaims =
        serde_json::from_str(r#"{"sub":"alice","exp":1700000000,"extra":1}"#).expect("decode");
    assert_eq!(decoded, claims);
}

#[test]
fn test_standard_claims_validation() {
    let claims = StandardClaims {
        expires_at: NOW - 100,
        not_before: NOW + 100,
        ..StandardClaims::default()
    };
    assert_eq!(
        kinds(claims.validate(NOW, 0)),
        ValidationErrorKind::EXPIRED | ValidationErrorKind::NOT_VALID_YET
    );

    let unset = StandardClaims::default();
    assert_eq!(kinds(unset.validate(NOW, 0)), ValidationErrorKind::empty());
    assert!(!unset.verify_expires_at(NOW, true));
    assert!(unset.verify_not_before(NOW, false));
    assert!(!unset.verify_audience("api", true));
}

#[test]
fn test_time_claims_boundaries() {
    let at_now = TimeClaims {
        expires_at: Some(NOW),
        not_before: Some(NOW),
        issued_at: Some(NOW),
    };
    // exp == now is expired; nbf == now and iat == now are fine.
    assert_eq!(
        kinds(signet_jwt::api::claims::validation::validate_time_claims(at_now, NOW, 0)),
        ValidationErrorKind::EXPIRED
    );
    assert_eq!(
        kinds(signet_jwt::api::claims::validation::validate_time_claims(at_now, NOW, 1)),
        ValidationErrorKind::empty()
    );
}

#[test]
fn test_extreme_float_timestamps_saturate() {
    let past = MapClaims::new()
        .with("exp", -1e30)
        .with("nbf", -1e30)
        .with("iat", -1e30);
    assert_eq!(past.timestamp("exp").ok().flatten(), Some(i64::MIN));
    let err = past.validate(NOW, 0).expect_err("expired");
    assert_eq!(err.errors(), ValidationErrorKind::EXPIRED);
    assert_eq!(err.to_string(), format!("token is expired by {}s", i64::MAX));

    let future = MapClaims::new()
        .with("exp", 1e30)
        .with("nbf", 1e30)
        .with("iat", 1e30);
    assert_eq!(future.timestamp("nbf").ok().flatten(), Some(i64::MAX));
    assert_eq!(kinds(future.validate(NOW, i64::MAX)), ValidationErrorKind::empty());
    assert_eq!(
        kinds(future.validate(NOW, 0)),
        ValidationErrorKind::NOT_VALID_YET | ValidationErrorKind::ISSUED_AT
    );
}

#[test]
fn test_extreme_decimal_timestamps_saturate() {
    let past = MapClaims::new().with("exp", JsonNumber::new("-1e30"));
    assert_eq!(kinds(past.validate(NOW, 0)), ValidationErrorKind::EXPIRED);
    assert_eq!(kinds(past.validate(i64::MIN, 0)), ValidationErrorKind::EXPIRED);

    let min = MapClaims::new().with("exp", JsonNumber::new(i64::MIN.to_string()));
    assert_eq!(kinds(min.validate(i64::MAX, i64::MAX)), ValidationErrorKind::EXPIRED);

    let max = MapClaims::new()
        .with("exp", JsonNumber::new(i64::MAX.to_string()))
        .with("nbf", JsonNumber::new("1e30"));
    assert_eq!(kinds(max.validate(i64::MIN, 0)), ValidationErrorKind::NOT_VALID_YET);
    assert_eq!(kinds(max.validate(i64::MAX, 0)), ValidationErrorKind::EXPIRED);
}

#[test]
fn test_extreme_time_claims_report_saturated_lag() {
    let times = TimeClaims {
        expires_at: Some(i64::MIN),
        not_before: Some(i64::MAX),
        issued_at: Some(i64::MAX),
    };
    let err = signet_jwt::api::claims::validation::validate_time_claims(times, i64::MAX, 0)
        .expect_err("expired");
    assert_eq!(err.errors(), ValidationErrorKind::EXPIRED);
    assert_eq!(err.to_string(), format!("token is expired by {}s", i64::MAX));

    let err = signet_jwt::api::claims::validation::validate_time_claims(times, NOW, 0)
        .expect_err("every check fails");
    assert_eq!(
        err.errors(),
        ValidationErrorKind::EXPIRED
            | ValidationErrorKind::NOT_VALID_YET
            | ValidationErrorKind::ISSUED_AT
    );
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct SessionClaims {
    session: String,
}

impl Claims for SessionClaims {
    fn validate(&self, _now: i64, _leeway: i64) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[test]
fn test_claims_trait_defaults() {
    let claims = SessionClaims::decode(br#"{"session":"abc"}"#, NumberMode::Decimal)
        .expect("decode");
    assert_eq!(claims.session, "abc");
    assert!(SessionClaims::decode(b"[]", NumberMode::Float).is_err());

    // No aud or iss field: absent passes only when not required.
    assert!(claims.verify_audience("api", false));
    assert!(!claims.verify_audience("api", true));
    assert!(claims.verify_issuer("auth", false));
    assert!(!claims.verify_issuer("auth", true));
}

#[test]
fn test_validation_error_merge_and_display() {
    let mut err = ValidationError::new("token is expired by 5s", ValidationErrorKind::EXPIRED);
    err.merge(ValidationError::new("token is not valid yet", ValidationErrorKind::NOT_VALID_YET));

    assert_eq!(
        err.errors(),
        ValidationErrorKind::EXPIRED | ValidationErrorKind::NOT_VALID_YET
    );
    assert!(err.is(ValidationErrorKind::EXPIRED));
    assert_eq!(err.to_string(), "token is expired by 5s");
    assert!(err.source().is_none());

    let bare = ValidationError::new("", ValidationErrorKind::MALFORMED);
    assert_eq!(bare.to_string(), "token is invalid");

    let wrapped = ValidationError::new("signature is invalid", ValidationErrorKind::SIGNATURE_INVALID)
        .with_inner(signet_jwt::JwtError::invalid_key("bad modulus"));
    assert_eq!(wrapped.to_string(), "key is invalid: bad modulus");
    assert!(wrapped.source().is_some());
}
