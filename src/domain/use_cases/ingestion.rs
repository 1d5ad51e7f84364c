use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::constants::{MAX_RESUME_BYTES, PDF_MIME};
use crate::domain::entities::resume::{NewResume, ResumeRecord, ResumeStatus};
use crate::domain::use_cases::profile::ProfileService;
use crate::errors::AppError;
use crate::infrastructure::parser::client::ResumeParserClient;
use crate::interfaces::repositories::resume::ResumeRepository;

/// An upload as it came off the wire, before any validation.
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Whether the profile picked up this upload's extraction. A degraded
/// sync still leaves a fully stored resume record behind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProfileSync {
    Synced { completeness: i32 },
    Degraded { reason: String },
}

pub struct IngestionOutcome {
    pub resume: ResumeRecord,
    pub profile_sync: ProfileSync,
}

/// Drives one upload end to end: validate, delegate to the extraction
/// service, persist a new version, then fold the extraction into the
/// profile.
pub struct IngestionService {
    parser: Arc<dyn ResumeParserClient>,
    resumes: Arc<dyn ResumeRepository>,
    profiles: ProfileService,
}

impl IngestionService {
    pub fn new(
        parser: Arc<dyn ResumeParserClient>,
        resumes: Arc<dyn ResumeRepository>,
        profiles: ProfileService,
    ) -> Self {
        IngestionService {
            parser,
            resumes,
            profiles,
        }
    }

    pub async fn ingest(
        &self,
        account_id: Uuid,
        file: UploadedFile,
    ) -> Result<IngestionOutcome, AppError> {
        validate_upload(&file)?;

        let started = Instant::now();
        let parsed = self
            .parser
            .parse(&file.file_name, file.bytes.clone())
            .await?;
        let processing_time_ms = started.elapsed().as_millis() as i64;

        let raw_text = parsed.text().unwrap_or_default().to_string();
        let text_length = parsed
            .text_length
            .unwrap_or_else(|| raw_text.chars().count() as i32);
        let word_count = parsed
            .word_count
            .unwrap_or_else(|| raw_text.split_whitespace().count() as i32);

        let new = NewResume {
            account_id,
            original_name: file.file_name.clone(),
            stored_name: format!("{}.pdf", Uuid::new_v4()),
            file_size: file.bytes.len() as i64,
            mime_type: PDF_MIME.to_string(),
            raw_text,
            text_length,
            word_count,
            extracted: parsed.extracted,
            status: ResumeStatus::Parsed,
            processing_time_ms,
        };

        let resume = self.resumes.insert(&new).await?;
        info!(
            account_id = %account_id,
            resume_id = %resume.id,
            version = resume.version,
            processing_time_ms,
            "resume stored"
        );

        // The record is already committed; a profile failure downgrades
        // the response instead of rolling the upload back.
        let profile_sync = match self
            .profiles
            .sync_from_extraction(account_id, &resume.extracted.0, resume.id)
            .await
        {
            Ok(completeness) => ProfileSync::Synced { completeness },
            Err(e) => {
                warn!(account_id = %account_id, resume_id = %resume.id, error = %e,
                    "profile sync failed after upload");
                ProfileSync::Degraded {
                    reason: "Profile could not be updated from this resume".into(),
                }
            }
        };

        Ok(IngestionOutcome {
            resume,
            profile_sync,
        })
    }
}

fn validate_upload(file: &UploadedFile) -> Result<(), AppError> {
    if file.bytes.is_empty() {
        return Err(AppError::validation("file", "No file uploaded"));
    }

    if file.bytes.len() > MAX_RESUME_BYTES {
        return Err(AppError::validation(
            "file",
            "File too large. Maximum size is 5MB",
        ));
    }

    let declared_pdf = file
        .content_type
        .as_deref()
        .is_none_or(|mime| mime == PDF_MIME);
    let looks_like_pdf = infer::get(&file.bytes)
        .map(|kind| kind.mime_type() == PDF_MIME)
        .unwrap_or(false);

    if !declared_pdf || !looks_like_pdf {
        return Err(AppError::validation(
            "file",
            "Only PDF files are supported",
        ));
    }

    Ok(())
}
