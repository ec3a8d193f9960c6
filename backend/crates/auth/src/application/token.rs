//! Token Issuer
//!
//! Mints and validates HS256 bearer tokens. No server-side state: a token is
//! valid until it expires and cannot be revoked.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Registered claims carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity asserted by a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

/// HS256 token issuer bound to one secret, issuer, and audience
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.jwt_issuer.as_str()]);
        validation.set_audience(&[config.jwt_audience.as_str()]);
        validation.set_required_spec_claims(&["sub", "iss", "aud", "iat", "exp"]);
        // Time window is checked in `decode_claims_at` against iat as well
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            ttl_secs: config.token_ttl_secs(),
        }
    }

    /// Mint a token for `username` valid from now
    pub fn generate(&self, username: &str) -> AuthResult<String> {
        self.generate_at(username, Utc::now())
    }

    /// Mint a token as if issued at `now`
    pub fn generate_at(&self, username: &str, now: DateTime<Utc>) -> AuthResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: username.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Verify signature, algorithm, issuer, audience, and time window
    pub fn decode_claims(&self, token: &str) -> AuthResult<Claims> {
        self.decode_claims_at(token, Utc::now())
    }

    /// Same as [`decode_claims`](Self::decode_claims) with an explicit clock
    ///
    /// Accepted only while `iat <= now < exp`.
    pub fn decode_claims_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Token rejected");
                AuthError::TokenInvalid
            })?;

        let now = now.timestamp();
        if claims.iat > now || now >= claims.exp {
            tracing::debug!(
                iat = claims.iat,
                exp = claims.exp,
                now,
                "Token outside its validity window"
            );
            return Err(AuthError::TokenInvalid);
        }

        Ok(claims)
    }

    /// Validate a token and return the identity it asserts
    pub fn validate(&self, token: &str) -> AuthResult<Identity> {
        self.validate_at(token, Utc::now())
    }

    /// Validate against an explicit clock
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Identity> {
        let claims = self.decode_claims_at(token, now)?;
        if claims.sub.is_empty() {
            return Err(AuthError::TokenInvalid);
        }
        Ok(Identity {
            username: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            jwt_issuer: "test-issuer".to_string(),
            jwt_audience: "test-audience".to_string(),
            ..AuthConfig::development()
        }
    }

    const S1: &str = "first-secret-first-secret-first-secret";
    const S2: &str = "second-secret-second-secret-second-secret";

    #[test]
    fn test_generate_claims() {
        let issuer = TokenIssuer::new(&config(S1));
        let token = issuer.generate("admin").unwrap();
        let claims = issuer.decode_claims(&token).unwrap();

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-audience");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn test_validate_roundtrip() {
        let issuer = TokenIssuer::new(&config(S1));
        let token = issuer.generate("admin").unwrap();
        assert_eq!(
            issuer.validate(&token).unwrap(),
            Identity {
                username: "admin".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenIssuer::new(&config(S1)).generate("admin").unwrap();
        let other = TokenIssuer::new(&config(S2));
        assert!(matches!(other.validate(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_expired_rejected() {
        let issuer = TokenIssuer::new(&config(S1));
        let issued = Utc::now() - Duration::hours(9);
        let token = issuer.generate_at("admin", issued).unwrap();
        assert!(matches!(issuer.validate(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_rejected_at_the_exact_expiry_second() {
        let issuer = TokenIssuer::new(&config(S1));
        let now = Utc::now();
        let token = issuer.generate_at("admin", now - Duration::hours(8)).unwrap();

        assert!(matches!(issuer.validate_at(&token, now), Err(AuthError::TokenInvalid)));
        assert!(issuer.validate_at(&token, now - Duration::seconds(1)).is_ok());
    }

    #[test]
    fn test_future_issued_at_rejected() {
        let issuer = TokenIssuer::new(&config(S1));
        let now = Utc::now();
        let token = issuer.generate_at("admin", now + Duration::hours(4)).unwrap();

        assert!(matches!(issuer.validate(&token), Err(AuthError::TokenInvalid)));
        assert!(matches!(issuer.validate_at(&token, now), Err(AuthError::TokenInvalid)));
        assert!(issuer.validate_at(&token, now + Duration::hours(4)).is_ok());
    }

    #[test]
    fn test_wrong_issuer_or_audience_rejected() {
        let token = TokenIssuer::new(&config(S1)).generate("admin").unwrap();

        let wrong_issuer = TokenIssuer::new(&AuthConfig {
            jwt_issuer: "someone-else".to_string(),
            ..config(S1)
        });
        assert!(wrong_issuer.validate(&token).is_err());

        let wrong_audience = TokenIssuer::new(&AuthConfig {
            jwt_audience: "someone-else".to_string(),
            ..config(S1)
        });
        assert!(wrong_audience.validate(&token).is_err());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let issuer = TokenIssuer::new(&config(S1));
        let genuine = issuer.generate("admin").unwrap();
        let forged = TokenIssuer::new(&config(S2)).generate("root").unwrap();

        let signature = genuine.rsplit('.').next().unwrap();
        let (forged_body, _) = forged.rsplit_once('.').unwrap();
        let spliced = format!("{forged_body}.{signature}");

        assert!(matches!(issuer.validate(&spliced), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_garbage_rejected() {
        let issuer = TokenIssuer::new(&config(S1));
        assert!(issuer.validate("not-a-token").is_err());
        assert!(issuer.validate("").is_err());
    }
}
