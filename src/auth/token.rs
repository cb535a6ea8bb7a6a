//! Token codec: issues and verifies the signed, time-bound JWTs that carry
//! a user's identity between requests.
//!
//! Tokens are signed with HS256 using the process-wide secret from
//! [`AuthConfig`]. Nothing is stored server-side; expiry is the only
//! invalidation mechanism. Verification collapses every failure cause
//! (malformed token, bad signature, unexpected algorithm, expiry) into one
//! uniform `Unauthorized` error — callers only need "authenticated or not".

use crate::config::AuthConfig;
use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in a signed token. Immutable once issued.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's unique identifier.
    pub sub: i64,
    /// The user's email address.
    pub email: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiration, seconds since the Unix epoch.
    pub exp: i64,
}

/// Signs a token for `user_id`/`email`, valid for `config.token_ttl` from
/// now. Two calls at different instants yield different token strings
/// because the timestamps are embedded in the claims.
pub fn issue_token(user_id: i64, email: &str, config: &AuthConfig) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_owned(),
        iat: now.timestamp(),
        exp: (now + config.token_ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to issue token: {}", e)))
}

/// Verifies a token against the configured secret and returns its claims.
///
/// Only HS256 is accepted, so a token produced with a different algorithm
/// is rejected regardless of its signature. Expiry is checked with zero
/// leeway. An empty secret never verifies anything.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Claims, AppError> {
    if config.jwt_secret.is_empty() {
        return Err(invalid_token());
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| invalid_token())
}

// One uniform message for every verification failure; the cause is not
// disclosed to the caller.
fn invalid_token() -> AppError {
    AppError::Unauthorized("Invalid or expired token".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn test_config(secret: &str) -> AuthConfig {
        AuthConfig::new(secret, chrono::Duration::hours(1))
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let config = test_config("test-secret-for-round-trip");
        let token = issue_token(42, "round@example.com", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "round@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_with_different_secret_fails() {
        let token = issue_token(1, "a@example.com", &test_config("secret-number-one")).unwrap();

        match verify_token(&token, &test_config("secret-number-two")) {
            Err(AppError::Unauthorized(msg)) => {
                assert_eq!(msg, "Invalid or expired token");
            }
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_expired_token_fails() {
        // Negative TTL produces an already-expired token.
        let config = AuthConfig::new("test-secret-for-expiry", chrono::Duration::hours(-2));
        let token = issue_token(2, "late@example.com", &config).unwrap();

        assert!(matches!(
            verify_token(&token, &config),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_empty_token_fails() {
        let config = test_config("test-secret-empty-token");
        assert!(verify_token("", &config).is_err());
    }

    #[test]
    fn test_empty_secret_never_verifies() {
        // Even a token actually signed with the empty key must be refused.
        let empty = test_config("");
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                sub: 3,
                email: "empty@example.com".to_string(),
                iat: chrono::Utc::now().timestamp(),
                exp: chrono::Utc::now().timestamp() + 3600,
            },
            &EncodingKey::from_secret(b""),
        )
        .unwrap();

        assert!(verify_token(&token, &empty).is_err());
    }

    #[test]
    fn test_algorithm_substitution_rejected() {
        // Same secret, but signed with HS384: the HS256-only verifier must
        // refuse it.
        let config = test_config("test-secret-alg-check");
        let token = encode(
            &Header::new(Algorithm::HS384),
            &Claims {
                sub: 4,
                email: "alg@example.com".to_string(),
                iat: chrono::Utc::now().timestamp(),
                exp: chrono::Utc::now().timestamp() + 3600,
            },
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_tampered_token_fails() {
        let config = test_config("test-secret-for-tampering");
        let token = issue_token(5, "tamper@example.com", &config).unwrap();

        // Flip the last character of the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(verify_token(&tampered, &config).is_err());
    }

    #[test]
    fn test_tokens_issued_at_different_instants_differ() {
        let config = test_config("test-secret-for-uniqueness");

        let first = issue_token(6, "twice@example.com", &config).unwrap();
        // Claims carry whole-second timestamps, so cross a second boundary.
        thread::sleep(Duration::from_millis(1100));
        let second = issue_token(6, "twice@example.com", &config).unwrap();

        assert_ne!(first, second);
        assert!(verify_token(&first, &config).is_ok());
        assert!(verify_token(&second, &config).is_ok());
    }
}
