//! Segment codec - base64url and the dot-delimited wire layout (RFC 7515)

use crate::error::{JwtError, JwtResult};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

/// URL-safe alphabet, never pads on encode, accepts canonical padding on decode.
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as an unpadded base64url segment
#[inline]
#[must_use]
pub fn encode_segment(input: &[u8]) -> String {
    SEGMENT_ENGINE.encode(input)
}

/// Decode a base64url segment
///
/// # Errors
/// Returns [`JwtError::Malformed`] on characters outside the URL-safe
/// alphabet or on a padding mismatch.
pub fn decode_segment(segment: &str) -> JwtResult<Vec<u8>> {
    SEGMENT_ENGINE
        .decode(segment)
        .map_err(|e| JwtError::malformed(format!("illegal base64url data: {e}")))
}

/// Split a compact token into its header, claims and signature segments
///
/// # Errors
/// Returns [`JwtError::Malformed`] unless there are exactly three non-empty
/// segments.
pub fn split_token(token: &str) -> JwtResult<[&str; 3]> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(claims), Some(signature), None)
            if !header.is_empty() && !claims.is_empty() && !signature.is_empty() =>
        {
            Ok([header, claims, signature])
        }
        _ => Err(JwtError::malformed(
            "token contains an invalid number of segments",
        )),
    }
}

/// Join header and claims segments into the signing input
#[inline]
pub(crate) fn join_segments(header: &str, claims: &str) -> String {
    let mut out = String::with_capacity(header.len() + 1 + claims.len());
    out.push_str(header);
    out.push('.');
    out.push_str(claims);
    out
}
