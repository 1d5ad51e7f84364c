use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::resume::{ResumeDetail, ResumeSummary};
use crate::errors::AppError;
use crate::interfaces::repositories::resume::ResumeRepository;

/// Read and delete operations on stored resume versions. Every query is
/// scoped to the owning account; another account's resume id behaves
/// exactly like a nonexistent one.
#[derive(Clone)]
pub struct ResumeService {
    resumes: Arc<dyn ResumeRepository>,
}

impl ResumeService {
    pub fn new(resumes: Arc<dyn ResumeRepository>) -> Self {
        ResumeService { resumes }
    }

    pub async fn list(&self, account_id: Uuid) -> Result<Vec<ResumeSummary>, AppError> {
        let rows = self.resumes.list(account_id).await?;
        Ok(rows.into_iter().map(ResumeSummary::from).collect())
    }

    pub async fn get(&self, id: Uuid, account_id: Uuid) -> Result<ResumeDetail, AppError> {
        self.resumes
            .get(id, account_id)
            .await?
            .map(ResumeDetail::from)
            .ok_or_else(|| AppError::NotFound("Resume not found".into()))
    }

    pub async fn delete(&self, id: Uuid, account_id: Uuid) -> Result<(), AppError> {
        let removed = self.resumes.delete(id, account_id).await?;
        if removed == 0 {
            return Err(AppError::NotFound("Resume not found".into()));
        }
        Ok(())
    }
}
