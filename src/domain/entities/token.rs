use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::AccountRole;
use crate::errors::AuthError;

/// Claims carried by the session token: identity, role, lifetime.
/// There is no server-side session table and no revocation list, so a
/// token stays valid until `exp` even after the client clears its cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: AccountRole,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn account_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::InvalidAccountId)
    }
}
