use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::errors::{AppError, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Student,
    Recruiter,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Student => "student",
            AccountRole::Recruiter => "recruiter",
        }
    }
}

/// Role-specific attributes. The tag doubles as the serialized `role` field,
/// so a student row can never carry recruiter fields and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleDetails {
    Student {
        headline: String,
        #[serde(default)]
        top_skills: Vec<String>,
        #[serde(default)]
        experience_years: i32,
    },
    Recruiter {
        company: String,
        position: String,
        #[serde(default)]
        hiring_focus: Option<String>,
    },
}

impl RoleDetails {
    pub fn role(&self) -> AccountRole {
        match self {
            RoleDetails::Student { .. } => AccountRole::Student,
            RoleDetails::Recruiter { .. } => AccountRole::Recruiter,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(flatten)]
    pub role_details: RoleDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn role(&self) -> AccountRole {
        self.role_details.role()
    }
}

/// Flat row shape of the `accounts` table. Role-specific columns are
/// nullable in the schema; `TryFrom` re-erects the sum type.
#[derive(Debug, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub headline: Option<String>,
    pub top_skills: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub hiring_focus: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role_details = match row.role.as_str() {
            "student" => RoleDetails::Student {
                headline: row.headline.unwrap_or_default(),
                top_skills: row.top_skills.unwrap_or_default(),
                experience_years: row.experience_years.unwrap_or(0),
            },
            "recruiter" => RoleDetails::Recruiter {
                company: row.company.unwrap_or_default(),
                position: row.position.unwrap_or_default(),
                hiring_focus: row.hiring_focus,
            },
            other => {
                return Err(AppError::Internal(format!(
                    "Account {} has unknown role '{}'",
                    row.id, other
                )))
            }
        };

        Ok(Account {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role_details,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Top skills arrive either as a JSON array or as one comma-separated
/// string, depending on which signup form sent them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TopSkills {
    List(Vec<String>),
    Csv(String),
}

impl TopSkills {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            TopSkills::List(skills) => skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            TopSkills::Csv(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Must be at least 6 characters"))]
    pub password: String,

    pub role: AccountRole,

    // Student fields
    pub headline: Option<String>,
    #[serde(default)]
    pub top_skills: Option<TopSkills>,
    pub experience_years: Option<i32>,

    // Recruiter fields
    pub company: Option<String>,
    pub position: Option<String>,
    pub hiring_focus: Option<String>,
}

impl SignupRequest {
    /// Normalized lookup/storage key for the email.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Enforces the role-specific required fields and builds the sum type.
    pub fn role_details(&self) -> Result<RoleDetails, AppError> {
        match self.role {
            AccountRole::Student => {
                let headline = self
                    .headline
                    .as_deref()
                    .map(str::trim)
                    .filter(|h| !h.is_empty());
                match headline {
                    Some(headline) => Ok(RoleDetails::Student {
                        headline: headline.to_string(),
                        top_skills: self
                            .top_skills
                            .clone()
                            .map(TopSkills::into_vec)
                            .unwrap_or_default(),
                        experience_years: self.experience_years.unwrap_or(0),
                    }),
                    None => Err(AppError::validation(
                        "headline",
                        "Headline is required for students",
                    )),
                }
            }
            AccountRole::Recruiter => {
                let mut missing = Vec::new();
                let company = self
                    .company
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty());
                let position = self
                    .position
                    .as_deref()
                    .map(str::trim)
                    .filter(|p| !p.is_empty());
                if company.is_none() {
                    missing.push(FieldError {
                        field: "company".into(),
                        message: "Company is required for recruiters".into(),
                    });
                }
                if position.is_none() {
                    missing.push(FieldError {
                        field: "position".into(),
                        message: "Position is required for recruiters".into(),
                    });
                }
                if !missing.is_empty() {
                    return Err(AppError::Validation(missing));
                }
                Ok(RoleDetails::Recruiter {
                    company: company.unwrap_or_default().to_string(),
                    position: position.unwrap_or_default().to_string(),
                    hiring_focus: self.hiring_focus.clone(),
                })
            }
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

impl LoginRequest {
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}
