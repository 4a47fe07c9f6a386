//! HS256 bearer tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{CredentialError, CredentialResult};

pub const DEFAULT_TOKEN_TTL_MINUTES: u32 = 60;

/// JWT claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and validates access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl_minutes: u32) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::minutes(i64::from(ttl_minutes)),
        }
    }

    /// Issue a token for `username` valid from now.
    pub fn issue(&self, username: &str) -> CredentialResult<String> {
        self.issue_at(username, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) -> CredentialResult<String> {
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| CredentialError::Encoding(e.to_string()))
    }

    /// Validate signature and expiry, returning the username.
    pub fn verify(&self, token: &str) -> CredentialResult<String> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| CredentialError::InvalidToken(e.to_string()))?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(b"test-secret", DEFAULT_TOKEN_TTL_MINUTES);
        let token = issuer.issue("maria").unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), "maria");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenIssuer::new(b"one", 60).issue("maria").unwrap();
        let result = TokenIssuer::new(b"two", 60).verify(&token);
        assert!(matches!(result, Err(CredentialError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = TokenIssuer::new(b"test-secret", 60);
        let token = issuer
            .issue_at("maria", Utc::now() - Duration::hours(3))
            .unwrap();
        assert!(matches!(
            issuer.verify(&token),
            Err(CredentialError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        let issuer = TokenIssuer::new(b"test-secret", 60);
        assert!(issuer.verify("not.a.jwt").is_err());
        assert!(issuer.verify("").is_err());
    }
}
