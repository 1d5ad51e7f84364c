use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::account::{Account, LoginRequest, SignupRequest};
use crate::errors::AppError;
use crate::infrastructure::auth::jwt::JwtService;
use crate::infrastructure::auth::password::{hash_password, verify_password};
use crate::interfaces::repositories::account::AccountRepository;

/// A freshly authenticated account plus its session token.
pub struct Session {
    pub token: String,
    pub account: Account,
}

#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(accounts: Arc<dyn AccountRepository>, jwt: JwtService) -> Self {
        AuthService { accounts, jwt }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<Session, AppError> {
        request.validate()?;
        let role_details = request.role_details()?;

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            email: request.normalized_email(),
            password_hash: hash_password(&request.password)?,
            role_details,
            created_at: now,
            updated_at: now,
        };

        let account = self.accounts.create(&account).await?;
        let token = self.jwt.issue(&account.id, account.role())?;

        info!(account_id = %account.id, role = account.role().as_str(), "account created");
        Ok(Session { token, account })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<Session, AppError> {
        request.validate()?;

        // Unknown email and wrong password produce the same error, so a
        // caller cannot probe which addresses are registered.
        let account = self
            .accounts
            .find_by_email(&request.normalized_email())
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(&request.password, &account.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let token = self.jwt.issue(&account.id, account.role())?;
        info!(account_id = %account.id, "login succeeded");
        Ok(Session { token, account })
    }
}
