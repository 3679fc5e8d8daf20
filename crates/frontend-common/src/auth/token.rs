//! Bearer token payload decoding
//!
//! Tokens are JWTs signed by the backend. The client never verifies the
//! signature; it only reads the subject and expiry from the payload.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has no payload segment")]
    MissingPayload,

    #[error("token payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not valid claims JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token subject is empty")]
    EmptySubject,
}

/// Claims the client cares about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username the token was issued to
    pub sub: String,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

impl TokenClaims {
    /// Expired once `now` reaches `exp`
    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        self.exp.saturating_mul(1000) <= now_millis
    }
}

/// Decode the claims of a `header.payload.signature` token
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::MissingPayload)?;
    let payload = payload.trim_end_matches('=');

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))?;
    let claims: TokenClaims = serde_json::from_slice(&bytes)?;

    if claims.sub.is_empty() {
        return Err(TokenError::EmptySubject);
    }
    Ok(claims)
}

#[cfg(test)]
pub(crate) fn encode_unsigned(sub: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::to_vec(&TokenClaims {
            sub: sub.to_string(),
            exp,
        })
        .unwrap(),
    );
    format!("{header}.{payload}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_subject_and_expiry() {
        let token = encode_unsigned("frog", 1_700_000_000);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "frog");
        assert_eq!(claims.exp, 1_700_000_000);
    }

    #[test]
    fn padded_payloads_decode() {
        let payload = base64::engine::general_purpose::URL_SAFE
            .encode(br#"{"sub":"ab","exp":5}"#);
        assert!(payload.ends_with('='));
        let claims = decode_claims(&format!("h.{payload}.s")).unwrap();
        assert_eq!(claims.sub, "ab");
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(matches!(
            decode_claims("no-dots"),
            Err(TokenError::MissingPayload)
        ));
        assert!(matches!(decode_claims("a..c"), Err(TokenError::MissingPayload)));
        assert!(matches!(
            decode_claims("a.!!!.c"),
            Err(TokenError::Base64(_))
        ));

        let not_json = URL_SAFE_NO_PAD.encode(b"hello");
        assert!(matches!(
            decode_claims(&format!("a.{not_json}.c")),
            Err(TokenError::Json(_))
        ));

        let no_exp = URL_SAFE_NO_PAD.encode(br#"{"sub":"frog"}"#);
        assert!(decode_claims(&format!("a.{no_exp}.c")).is_err());
    }

    #[test]
    fn empty_subject_is_rejected() {
        let token = encode_unsigned("", 1_700_000_000);
        assert!(matches!(
            decode_claims(&token),
            Err(TokenError::EmptySubject)
        ));
    }

    #[test]
    fn expiry_boundary_counts_as_expired() {
        let claims = TokenClaims {
            sub: "frog".into(),
            exp: 100,
        };
        assert!(!claims.is_expired_at(99_999));
        assert!(claims.is_expired_at(100_000));
        assert!(claims.is_expired_at(100_001));
    }
}
