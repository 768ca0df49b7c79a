//! Signed session tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

use super::{
    errors::{AuthError, AuthResult},
    models::{TokenClaims, UserId},
};

/// Default session lifetime in seconds
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// HS256 signing and verification keys derived from one shared secret.
///
/// Anyone holding the secret can mint tokens; keeping it private is the
/// caller's job.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenKeys {
    /// Build keys from a shared HMAC secret. Tokens issued by these keys
    /// live for `ttl`, and verification allows no clock leeway.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a token for `user_id` that expires `ttl` from now.
    pub fn issue(&self, user_id: UserId) -> AuthResult<String> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if it were minted at `issued_at`.
    pub fn issue_at(&self, user_id: UserId, issued_at: DateTime<Utc>) -> AuthResult<String> {
        let claims = TokenClaims {
            sub: user_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!("failed to sign session token: {e}");
            AuthError::TokenInvalid
        })
    }

    /// Check signature and expiry and return the claims.
    pub fn verify(&self, token: &str) -> AuthResult<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn keys() -> TokenKeys {
        TokenKeys::new(
            b"test_secret_key_for_testing_only_32b",
            Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        )
    }

    #[test]
    fn test_issue_then_verify() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_expired_token() {
        let keys = keys();
        let issued_at = Utc::now() - Duration::seconds(DEFAULT_TOKEN_TTL_SECS + 5);
        let token = keys.issue_at(Uuid::new_v4(), issued_at).unwrap();

        assert!(matches!(keys.verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_token_still_valid_just_before_expiry() {
        let keys = keys();
        let issued_at = Utc::now() - Duration::seconds(DEFAULT_TOKEN_TTL_SECS - 30);
        let token = keys.issue_at(Uuid::new_v4(), issued_at).unwrap();

        assert!(keys.verify(&token).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = keys().issue(Uuid::new_v4()).unwrap();
        let other = TokenKeys::new(
            b"another_secret_key_with_enough_bytes",
            Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        );

        assert!(matches!(other.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_tampered_and_malformed_tokens() {
        let keys = keys();
        let token = keys.issue(Uuid::new_v4()).unwrap();
        let other = keys.issue(Uuid::new_v4()).unwrap();

        // Graft another user's payload onto this token's signature.
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(matches!(keys.verify(&tampered), Err(AuthError::TokenInvalid)));
        assert!(matches!(keys.verify("not.a.jwt"), Err(AuthError::TokenInvalid)));
        assert!(matches!(keys.verify(""), Err(AuthError::TokenInvalid)));
    }
}
