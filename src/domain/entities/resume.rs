use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::constants::TEXT_PREVIEW_CHARS;

/// Lifecycle of one upload attempt. Records are only ever written with
/// `Parsed` today; the other states exist for the wire contract and for
/// any future deferred-parsing flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resume_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResumeStatus {
    Uploaded,
    Parsing,
    Parsed,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkSet {
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificationItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
}

/// Structured fields the extraction service pulled out of the PDF.
/// Stored verbatim on the resume record; the profile synthesizer merges
/// from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub certifications: Vec<CertificationItem>,
    #[serde(default, alias = "urls")]
    pub links: LinkSet,
    #[serde(default)]
    pub years_of_experience: Option<f64>,
}

/// One immutable versioned snapshot of an upload plus its extraction.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub original_name: String,
    pub stored_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub raw_text: String,
    pub text_length: i32,
    pub word_count: i32,
    pub extracted: Json<ExtractedData>,
    pub status: ResumeStatus,
    pub processing_time_ms: i64,
    pub uploaded_at: DateTime<Utc>,
    pub version: i32,
    pub is_latest: bool,
}

/// Everything the store needs to insert a record. Version and `is_latest`
/// are assigned inside the insert transaction, never by the caller.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub account_id: Uuid,
    pub original_name: String,
    pub stored_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub raw_text: String,
    pub text_length: i32,
    pub word_count: i32,
    pub extracted: ExtractedData,
    pub status: ResumeStatus,
    pub processing_time_ms: i64,
}

/// Listing projection: everything except the raw text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResumeSummaryRow {
    pub id: Uuid,
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: ResumeStatus,
    pub version: i32,
    pub is_latest: bool,
    pub extracted: Json<ExtractedData>,
}

#[derive(Debug, Serialize)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: ResumeStatus,
    pub version: i32,
    pub is_latest: bool,
    pub skill_count: usize,
    pub education_count: usize,
    pub experience_count: usize,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub years_of_experience: Option<f64>,
}

impl From<ResumeSummaryRow> for ResumeSummary {
    fn from(row: ResumeSummaryRow) -> Self {
        let extracted = row.extracted.0;
        ResumeSummary {
            id: row.id,
            filename: row.original_name,
            uploaded_at: row.uploaded_at,
            status: row.status,
            version: row.version,
            is_latest: row.is_latest,
            skill_count: extracted.skills.len(),
            education_count: extracted.education.len(),
            experience_count: extracted.experience.len(),
            name: extracted.name,
            email: extracted.email,
            phone: extracted.phone,
            years_of_experience: extracted.years_of_experience,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeDetail {
    pub id: Uuid,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: ResumeStatus,
    pub version: i32,
    pub is_latest: bool,
    pub file_size: i64,
    pub text_length: i32,
    pub word_count: i32,
    pub processing_time_ms: i64,
    pub personal_info: PersonalInfo,
    pub skills: Vec<String>,
    pub education: Vec<EducationItem>,
    pub experience: Vec<ExperienceItem>,
    pub certifications: Vec<CertificationItem>,
    pub links: LinkSet,
    pub years_of_experience: Option<f64>,
    pub text_preview: String,
}

impl From<ResumeRecord> for ResumeDetail {
    fn from(record: ResumeRecord) -> Self {
        let extracted = record.extracted.0;
        ResumeDetail {
            id: record.id,
            filename: record.original_name,
            uploaded_at: record.uploaded_at,
            status: record.status,
            version: record.version,
            is_latest: record.is_latest,
            file_size: record.file_size,
            text_length: record.text_length,
            word_count: record.word_count,
            processing_time_ms: record.processing_time_ms,
            personal_info: PersonalInfo {
                name: extracted.name,
                email: extracted.email,
                phone: extracted.phone,
                location: extracted.location,
            },
            skills: extracted.skills,
            education: extracted.education,
            experience: extracted.experience,
            certifications: extracted.certifications,
            links: extracted.links,
            years_of_experience: extracted.years_of_experience,
            text_preview: preview(&record.raw_text),
        }
    }
}

fn preview(raw_text: &str) -> String {
    if raw_text.is_empty() {
        return String::new();
    }
    let truncated: String = raw_text.chars().take(TEXT_PREVIEW_CHARS).collect();
    if raw_text.chars().count() > TEXT_PREVIEW_CHARS {
        format!("{}...", truncated)
    } else {
        truncated
    }
}
