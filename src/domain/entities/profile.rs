use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entities::option_fields::OptionField;
use crate::domain::entities::resume::{ExtractedData, LinkSet};
use crate::domain::skills;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    #[serde(default)]
    pub proficiency: Option<String>,
}

/// The single mutable, synthesized profile for an account.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    pub account_id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub objective: Option<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub all_skills: Vec<String>,
    pub total_years_experience: Option<f64>,
    pub work_experience: Json<Vec<WorkExperience>>,
    pub education: Json<Vec<EducationEntry>>,
    pub certifications: Json<Vec<Certification>>,
    pub projects: Json<Vec<Project>>,
    pub links: Json<LinkSet>,
    pub languages: Json<Vec<Language>>,
    pub achievements: Vec<String>,
    pub last_resume_id: Option<Uuid>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub completeness: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Full-or-nothing completeness weights; they sum to 100.
const WEIGHT_NAME: i32 = 10;
const WEIGHT_EMAIL: i32 = 10;
const WEIGHT_PHONE: i32 = 10;
const WEIGHT_SKILLS: i32 = 15;
const WEIGHT_WORK_EXPERIENCE: i32 = 20;
const WEIGHT_EDUCATION: i32 = 15;
const WEIGHT_SUMMARY: i32 = 10;
const WEIGHT_LINKS: i32 = 10;

impl UserProfile {
    pub fn empty(account_id: Uuid) -> Self {
        let now = Utc::now();
        UserProfile {
            account_id,
            full_name: None,
            email: None,
            phone: None,
            location: None,
            summary: None,
            objective: None,
            technical_skills: Vec::new(),
            soft_skills: Vec::new(),
            all_skills: Vec::new(),
            total_years_experience: None,
            work_experience: Json(Vec::new()),
            education: Json(Vec::new()),
            certifications: Json(Vec::new()),
            projects: Json(Vec::new()),
            links: Json(LinkSet::default()),
            languages: Json(Vec::new()),
            achievements: Vec::new(),
            last_resume_id: None,
            last_synced_at: None,
            completeness: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Deterministic weighted sum over field presence. No partial credit.
    pub fn calculate_completeness(&self) -> i32 {
        let mut score = 0;
        if present(&self.full_name) {
            score += WEIGHT_NAME;
        }
        if present(&self.email) {
            score += WEIGHT_EMAIL;
        }
        if present(&self.phone) {
            score += WEIGHT_PHONE;
        }
        if !self.all_skills.is_empty() {
            score += WEIGHT_SKILLS;
        }
        if !self.work_experience.0.is_empty() {
            score += WEIGHT_WORK_EXPERIENCE;
        }
        if !self.education.0.is_empty() {
            score += WEIGHT_EDUCATION;
        }
        if present(&self.summary) {
            score += WEIGHT_SUMMARY;
        }
        if present(&self.links.0.linkedin) || present(&self.links.0.github) {
            score += WEIGHT_LINKS;
        }
        score
    }

    /// Merges one extraction into the profile.
    ///
    /// Scalars follow "present → overwrite, absent → keep". List fields
    /// are replaced wholesale, a fresh parse being more authoritative
    /// than an accumulation of stale entries.
    pub fn apply_extraction(&mut self, extracted: &ExtractedData) {
        overwrite_if_present(&mut self.full_name, &extracted.name);
        overwrite_if_present(&mut self.email, &extracted.email);
        overwrite_if_present(&mut self.phone, &extracted.phone);
        overwrite_if_present(&mut self.location, &extracted.location);

        let buckets = skills::categorize(&extracted.skills);
        self.technical_skills = buckets.technical;
        self.soft_skills = buckets.soft;
        self.all_skills = buckets.all;

        self.education.0 = extracted
            .education
            .iter()
            .map(|e| EducationEntry {
                institution: e.institution.clone(),
                degree: e.degree.clone(),
                field: e.field.clone(),
                year: e.year.clone(),
                grade: None,
                description: None,
            })
            .collect();

        self.work_experience.0 = extracted
            .experience
            .iter()
            .map(|e| WorkExperience {
                company: e.company.clone(),
                position: e.position.clone(),
                duration: e.duration.clone(),
                description: None,
                start_date: None,
                end_date: None,
                current: false,
            })
            .collect();

        self.certifications.0 = extracted
            .certifications
            .iter()
            .map(|c| Certification {
                name: c.name.clone(),
                issuer: c.issuer.clone(),
                date: None,
                credential_id: None,
            })
            .collect();

        // Links are a set of scalars: merge per sub-field.
        overwrite_if_present(&mut self.links.0.linkedin, &extracted.links.linkedin);
        overwrite_if_present(&mut self.links.0.github, &extracted.links.github);
        overwrite_if_present(&mut self.links.0.portfolio, &extracted.links.portfolio);
        if !extracted.links.other.is_empty() {
            self.links.0.other = extracted.links.other.clone();
        }

        if let Some(years) = extracted.years_of_experience {
            self.total_years_experience = Some(years);
        }

        self.updated_at = Utc::now();
        self.completeness = self.calculate_completeness();
    }

    /// Applies a manual PATCH. Absent fields stay, `null` clears, values
    /// overwrite; the skill list is re-categorized when replaced.
    pub fn apply_patch(&mut self, patch: ProfilePatch) {
        patch.full_name.apply_to(&mut self.full_name);
        patch.email.apply_to(&mut self.email);
        patch.phone.apply_to(&mut self.phone);
        patch.location.apply_to(&mut self.location);
        patch.summary.apply_to(&mut self.summary);
        patch.objective.apply_to(&mut self.objective);
        patch
            .total_years_experience
            .apply_to(&mut self.total_years_experience);

        match patch.skills.into_option() {
            None => {}
            Some(None) => {
                self.technical_skills.clear();
                self.soft_skills.clear();
                self.all_skills.clear();
            }
            Some(Some(skills)) => {
                let buckets = skills::categorize(&skills);
                self.technical_skills = buckets.technical;
                self.soft_skills = buckets.soft;
                self.all_skills = buckets.all;
            }
        }

        patch.work_experience.apply_to_vec(&mut self.work_experience.0);
        patch.education.apply_to_vec(&mut self.education.0);
        patch.certifications.apply_to_vec(&mut self.certifications.0);
        patch.projects.apply_to_vec(&mut self.projects.0);
        patch.languages.apply_to_vec(&mut self.languages.0);
        patch.achievements.apply_to_vec(&mut self.achievements);

        if let Some(links) = patch.links.into_option() {
            self.links.0 = links.unwrap_or_default();
        }

        self.updated_at = Utc::now();
        self.completeness = self.calculate_completeness();
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn overwrite_if_present(target: &mut Option<String>, candidate: &Option<String>) {
    if let Some(value) = candidate.as_deref() {
        if !value.trim().is_empty() {
            *target = Some(value.to_string());
        }
    }
}

/// Body of `PATCH /profile`.
#[derive(Debug, Default, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub full_name: OptionField<String>,
    #[serde(default)]
    pub email: OptionField<String>,
    #[serde(default)]
    pub phone: OptionField<String>,
    #[serde(default)]
    pub location: OptionField<String>,
    #[serde(default)]
    pub summary: OptionField<String>,
    #[serde(default)]
    pub objective: OptionField<String>,
    #[serde(default)]
    pub skills: OptionField<Vec<String>>,
    #[serde(default)]
    pub total_years_experience: OptionField<f64>,
    #[serde(default)]
    pub work_experience: OptionField<Vec<WorkExperience>>,
    #[serde(default)]
    pub education: OptionField<Vec<EducationEntry>>,
    #[serde(default)]
    pub certifications: OptionField<Vec<Certification>>,
    #[serde(default)]
    pub projects: OptionField<Vec<Project>>,
    #[serde(default)]
    pub languages: OptionField<Vec<Language>>,
    #[serde(default)]
    pub achievements: OptionField<Vec<String>>,
    #[serde(default)]
    pub links: OptionField<LinkSet>,
}
