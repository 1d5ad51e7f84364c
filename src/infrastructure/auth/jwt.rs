use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use uuid::Uuid;

use crate::constants::SESSION_TTL_DAYS;
use crate::domain::entities::account::AccountRole;
use crate::domain::entities::token::Claims;
use crate::errors::AuthError;
use crate::settings::{AppConfig, JwtKeys};

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    ttl: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            ttl: Duration::days(SESSION_TTL_DAYS),
        }
    }

    #[cfg(test)]
    pub fn with_ttl(config: &AppConfig, ttl: Duration) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            ttl,
        }
    }

    pub fn issue(&self, account_id: &Uuid, role: AccountRole) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            role,
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    /// Validates signature and expiry. Every failure mode collapses into
    /// an `AuthError`; callers map that to one uniform 401.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(AuthError::from)
    }
}
