use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::profile::{ProfilePatch, UserProfile};
use crate::domain::entities::resume::ExtractedData;
use crate::errors::AppError;
use crate::interfaces::repositories::profile::ProfileRepository;

#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        ProfileService { profiles }
    }

    pub async fn get(&self, account_id: Uuid) -> Result<Option<UserProfile>, AppError> {
        self.profiles.find(account_id).await
    }

    /// Applies a manual edit, creating the profile on first touch.
    /// Returns the recomputed completeness score.
    pub async fn apply_patch(
        &self,
        account_id: Uuid,
        patch: ProfilePatch,
    ) -> Result<i32, AppError> {
        let mut profile = self
            .profiles
            .find(account_id)
            .await?
            .unwrap_or_else(|| UserProfile::empty(account_id));

        profile.apply_patch(patch);
        self.profiles.upsert(&profile).await?;

        Ok(profile.completeness)
    }

    /// Folds one resume extraction into the profile and records which
    /// resume produced it.
    pub async fn sync_from_extraction(
        &self,
        account_id: Uuid,
        extracted: &ExtractedData,
        resume_id: Uuid,
    ) -> Result<i32, AppError> {
        let mut profile = self
            .profiles
            .find(account_id)
            .await?
            .unwrap_or_else(|| UserProfile::empty(account_id));

        profile.apply_extraction(extracted);
        profile.last_resume_id = Some(resume_id);
        profile.last_synced_at = Some(Utc::now());
        self.profiles.upsert(&profile).await?;

        Ok(profile.completeness)
    }
}
