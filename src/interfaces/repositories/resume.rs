use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::resume::{NewResume, ResumeRecord, ResumeSummaryRow};
use crate::errors::AppError;

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Inserts a new version for the account and demotes every earlier
    /// record in the same transaction.
    async fn insert(&self, new: &NewResume) -> Result<ResumeRecord, AppError>;
    async fn get(&self, id: Uuid, account_id: Uuid) -> Result<Option<ResumeRecord>, AppError>;
    async fn list(&self, account_id: Uuid) -> Result<Vec<ResumeSummaryRow>, AppError>;
    /// Returns the number of rows removed; zero means not found or not owned.
    async fn delete(&self, id: Uuid, account_id: Uuid) -> Result<u64, AppError>;
}
