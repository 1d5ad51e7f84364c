use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::profile::UserProfile;
use crate::errors::AppError;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, account_id: Uuid) -> Result<Option<UserProfile>, AppError>;
    async fn upsert(&self, profile: &UserProfile) -> Result<(), AppError>;
}
