//! Compact signed token encoding.
//!
//! A token is two base64url (unpadded) segments joined by `.`:
//!
//! ```text
//! base64url(canonical JSON claims) . base64url(HMAC-SHA256(first segment))
//! ```
//!
//! The MAC covers the encoded claims text exactly as transmitted, so any
//! change to either segment fails verification. All functions here are pure.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::Mac;

use crate::claims::{Claims, SignedToken};
use crate::error::TokenError;
use crate::key::SigningKey;

pub const SEPARATOR: char = '.';

/// Serializes claims to their canonical JSON form and base64url-encodes it.
pub fn encode(claims: &Claims) -> Result<String, TokenError> {
    let json = serde_json::to_vec(claims)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// HMAC-SHA256 over the encoded claims, as base64url text.
pub fn sign(encoded_claims: &str, key: &SigningKey) -> String {
    let mut mac = key.mac();
    mac.update(encoded_claims.as_bytes());
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

/// Recomputes the MAC and compares it to `signature` in constant time.
///
/// A signature that is not valid base64url never verifies.
pub fn verify(encoded_claims: &str, signature: &str, key: &SigningKey) -> bool {
    let Ok(signature) = URL_SAFE_NO_PAD.decode(signature) else {
        return false;
    };

    let mut mac = key.mac();
    mac.update(encoded_claims.as_bytes());
    mac.verify_slice(&signature).is_ok()
}

/// Splits a token into its claims and signature segments.
pub fn split(token: &str) -> Result<(&str, &str), TokenError> {
    let (claims, signature) = token.split_once(SEPARATOR).ok_or(TokenError::Malformed)?;

    if claims.is_empty() || signature.is_empty() || signature.contains(SEPARATOR) {
        return Err(TokenError::Malformed);
    }

    Ok((claims, signature))
}

/// Parses an encoded claims segment. Does not check the signature.
pub fn decode_claims(encoded_claims: &str) -> Result<Claims, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded_claims)
        .map_err(|_| TokenError::Malformed)?;

    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

/// Splits a token and parses its claims. Does not check the signature.
pub fn decode(token: &str) -> Result<Claims, TokenError> {
    let (encoded_claims, _) = split(token)?;
    decode_claims(encoded_claims)
}

/// Encodes and signs claims into a token.
pub fn seal(claims: &Claims, key: &SigningKey) -> Result<SignedToken, TokenError> {
    let encoded = encode(claims)?;
    let signature = sign(&encoded, key);
    Ok(SignedToken::new(format!("{encoded}{SEPARATOR}{signature}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::{Role, TokenKind};

    fn test_key() -> SigningKey {
        SigningKey::new(b"test-secret-key-at-least-32-characters-long").unwrap()
    }

    fn sample_claims() -> Claims {
        Claims::new(
            "jane@x.com",
            Role::Student,
            1_700_000_000,
            1_700_003_600,
            TokenKind::Access,
        )
    }

    #[test]
    fn test_encode_is_deterministic() {
        let claims = sample_claims();
        assert_eq!(encode(&claims).unwrap(), encode(&claims.clone()).unwrap());

        let key = test_key();
        assert_eq!(
            seal(&claims, &key).unwrap(),
            seal(&claims, &key).unwrap()
        );
    }

    #[test]
    fn test_encode_is_unpadded_base64url() {
        let encoded = encode(&sample_claims()).unwrap();
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn test_decode_returns_original_claims() {
        let claims = sample_claims();
        let token = seal(&claims, &test_key()).unwrap();
        assert_eq!(decode(token.as_str()).unwrap(), claims);
    }

    #[test]
    fn test_sign_and_verify() {
        let key = test_key();
        let encoded = encode(&sample_claims()).unwrap();
        let signature = sign(&encoded, &key);

        assert!(verify(&encoded, &signature, &key));
        assert!(!verify(&encoded, "not*base64", &key));
        assert!(!verify(&encoded, &signature[..signature.len() - 2], &key));

        let other_key = SigningKey::new(b"another-secret-key-at-least-32-chars!!").unwrap();
        assert!(!verify(&encoded, &signature, &other_key));
    }

    #[test]
    fn test_split_rejects_bad_structure() {
        assert!(matches!(split(""), Err(TokenError::Malformed)));
        assert!(matches!(split("no-separator"), Err(TokenError::Malformed)));
        assert!(matches!(split(".sig"), Err(TokenError::Malformed)));
        assert!(matches!(split("claims."), Err(TokenError::Malformed)));
        assert!(matches!(split("a.b.c"), Err(TokenError::Malformed)));
        assert_eq!(split("a.b").unwrap(), ("a", "b"));
    }

    #[test]
    fn test_decode_claims_rejects_garbage() {
        assert!(matches!(
            decode_claims("!!!not-base64!!!"),
            Err(TokenError::Malformed)
        ));

        let not_json = URL_SAFE_NO_PAD.encode(b"hello");
        assert!(matches!(decode_claims(&not_json), Err(TokenError::Malformed)));

        let wrong_types =
            URL_SAFE_NO_PAD.encode(br#"{"sub":1,"role":"ADMIN","iat":1,"exp":2,"typ":"ACCESS"}"#);
        assert!(matches!(
            decode_claims(&wrong_types),
            Err(TokenError::Malformed)
        ));

        let bad_kind =
            URL_SAFE_NO_PAD.encode(br#"{"sub":"a","role":"ADMIN","iat":1,"exp":2,"typ":"ID"}"#);
        assert!(matches!(decode_claims(&bad_kind), Err(TokenError::Malformed)));
    }
}
