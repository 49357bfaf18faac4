use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::error::AuthError;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("token decode/validation failed")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::TokenExpired,
            JwtError::Encode(_) | JwtError::Invalid(_) => AuthError::TokenInvalid,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Claims {
    pub(crate) sub: Uuid,
    pub(crate) email: String,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

pub(crate) struct JwtService {
    secret: String,
    ttl_seconds: i64,
}

impl JwtService {
    const DEFAULT_TTL_SECONDS: i64 = 24 * 60 * 60;
    const LEEWAY_SECONDS: u64 = 10;

    pub(crate) fn new(secret: &str, ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        JwtService {
            secret: secret.into(),
            ttl_seconds,
        }
    }

    pub(crate) fn generate_token(&self, user_id: Uuid, email: &str) -> Result<String, JwtError> {
        self.generate_token_at(user_id, email, Utc::now())
    }

    pub(crate) fn generate_token_at(
        &self,
        user_id: Uuid,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims {
            sub: user_id,
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(self.ttl_seconds)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(JwtError::Encode)
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = Self::LEEWAY_SECONDS;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Invalid(e),
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::{JwtError, JwtService};
    use crate::domain::error::AuthError;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn token_round_trips_claims() {
        let jwt = JwtService::new(SECRET, 3600);
        let user_id = Uuid::new_v4();
        let token = jwt
            .generate_token(user_id, "admin@example.com")
            .expect("token must be issued");

        let claims = jwt.verify_token(&token).expect("token must verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_maps_to_token_expired() {
        let jwt = JwtService::new(SECRET, 60);
        let token = jwt
            .generate_token_at(Uuid::new_v4(), "a@example.com", Utc::now() - Duration::hours(2))
            .expect("token must be issued");

        let err = jwt.verify_token(&token).expect_err("token must be expired");
        assert!(matches!(err, JwtError::Expired));
        assert_eq!(AuthError::from(err), AuthError::TokenExpired);
    }

    #[test]
    fn foreign_signature_maps_to_token_invalid() {
        let issuer = JwtService::new("ffffffffffffffffffffffffffffffff", 60);
        let token = issuer
            .generate_token(Uuid::new_v4(), "a@example.com")
            .expect("token must be issued");

        let err = JwtService::new(SECRET, 60)
            .verify_token(&token)
            .expect_err("signature must not match");
        assert_eq!(AuthError::from(err), AuthError::TokenInvalid);
    }

    #[test]
    fn garbage_is_invalid() {
        let err = JwtService::new(SECRET, 60)
            .verify_token("not-a-jwt")
            .expect_err("must fail");
        assert!(matches!(err, JwtError::Invalid(_)));
    }

    #[test]
    fn non_positive_ttl_falls_back_to_default() {
        let jwt = JwtService::new(SECRET, 0);
        assert_eq!(jwt.ttl_seconds, 24 * 60 * 60);
    }
}
