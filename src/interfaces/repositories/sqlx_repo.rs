use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountRow, RoleDetails};
use crate::domain::entities::profile::UserProfile;
use crate::domain::entities::resume::{NewResume, ResumeRecord, ResumeSummaryRow};
use crate::errors::AppError;
use crate::interfaces::repositories::account::AccountRepository;
use crate::interfaces::repositories::profile::ProfileRepository;
use crate::interfaces::repositories::resume::ResumeRepository;

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, role, headline, top_skills, \
     experience_years, company, position, hiring_focus, created_at, updated_at";

#[derive(Clone)]
pub struct SqlxAccountRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxResumeRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProfileRepo {
    pub pool: PgPool,
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

#[async_trait]
impl AccountRepository for SqlxAccountRepo {
    async fn create(&self, account: &Account) -> Result<Account, AppError> {
        let (headline, top_skills, experience_years, company, position, hiring_focus) =
            match &account.role_details {
                RoleDetails::Student {
                    headline,
                    top_skills,
                    experience_years,
                } => (
                    Some(headline.clone()),
                    Some(top_skills.clone()),
                    Some(*experience_years),
                    None,
                    None,
                    None,
                ),
                RoleDetails::Recruiter {
                    company,
                    position,
                    hiring_focus,
                } => (
                    None,
                    None,
                    None,
                    Some(company.clone()),
                    Some(position.clone()),
                    hiring_focus.clone(),
                ),
            };

        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "INSERT INTO accounts \
             (id, name, email, password_hash, role, headline, top_skills, \
              experience_years, company, position, hiring_focus, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role().as_str())
        .bind(headline)
        .bind(top_skills)
        .bind(experience_years)
        .bind(company)
        .bind(position)
        .bind(hiring_focus)
        .bind(account.created_at)
        .bind(account.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::validation("email", "Email already registered")
            } else {
                AppError::from(e)
            }
        })?;

        Account::try_from(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }
}

#[async_trait]
impl ResumeRepository for SqlxResumeRepo {
    async fn insert(&self, new: &NewResume) -> Result<ResumeRecord, AppError> {
        // Demote-then-insert must be atomic or two concurrent uploads can
        // both end up `is_latest`. The partial unique index on
        // (account_id) WHERE is_latest backstops the transaction.
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE resumes SET is_latest = FALSE WHERE account_id = $1 AND is_latest")
            .bind(new.account_id)
            .execute(&mut *tx)
            .await?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM resumes WHERE account_id = $1")
                .bind(new.account_id)
                .fetch_one(&mut *tx)
                .await?;

        let record = sqlx::query_as::<_, ResumeRecord>(
            "INSERT INTO resumes \
             (id, account_id, original_name, stored_name, file_size, mime_type, \
              raw_text, text_length, word_count, extracted, status, \
              processing_time_ms, uploaded_at, version, is_latest) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW(), $13, TRUE) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(new.account_id)
        .bind(&new.original_name)
        .bind(&new.stored_name)
        .bind(new.file_size)
        .bind(&new.mime_type)
        .bind(&new.raw_text)
        .bind(new.text_length)
        .bind(new.word_count)
        .bind(sqlx::types::Json(&new.extracted))
        .bind(new.status)
        .bind(new.processing_time_ms)
        .bind((existing + 1) as i32)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }

    async fn get(&self, id: Uuid, account_id: Uuid) -> Result<Option<ResumeRecord>, AppError> {
        let record = sqlx::query_as::<_, ResumeRecord>(
            "SELECT * FROM resumes WHERE id = $1 AND account_id = $2",
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self, account_id: Uuid) -> Result<Vec<ResumeSummaryRow>, AppError> {
        let rows = sqlx::query_as::<_, ResumeSummaryRow>(
            "SELECT id, original_name, uploaded_at, status, version, is_latest, extracted \
             FROM resumes WHERE account_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn delete(&self, id: Uuid, account_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn find(&self, account_id: Uuid) -> Result<Option<UserProfile>, AppError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT * FROM profiles WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO profiles \
             (account_id, full_name, email, phone, location, summary, objective, \
              technical_skills, soft_skills, all_skills, total_years_experience, \
              work_experience, education, certifications, projects, links, languages, \
              achievements, last_resume_id, last_synced_at, completeness, \
              created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
                     $15, $16, $17, $18, $19, $20, $21, $22, $23) \
             ON CONFLICT (account_id) DO UPDATE SET \
              full_name = EXCLUDED.full_name, \
              email = EXCLUDED.email, \
              phone = EXCLUDED.phone, \
              location = EXCLUDED.location, \
              summary = EXCLUDED.summary, \
              objective = EXCLUDED.objective, \
              technical_skills = EXCLUDED.technical_skills, \
              soft_skills = EXCLUDED.soft_skills, \
              all_skills = EXCLUDED.all_skills, \
              total_years_experience = EXCLUDED.total_years_experience, \
              work_experience = EXCLUDED.work_experience, \
              education = EXCLUDED.education, \
              certifications = EXCLUDED.certifications, \
              projects = EXCLUDED.projects, \
              links = EXCLUDED.links, \
              languages = EXCLUDED.languages, \
              achievements = EXCLUDED.achievements, \
              last_resume_id = EXCLUDED.last_resume_id, \
              last_synced_at = EXCLUDED.last_synced_at, \
              completeness = EXCLUDED.completeness, \
              updated_at = EXCLUDED.updated_at",
        )
        .bind(profile.account_id)
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.location)
        .bind(&profile.summary)
        .bind(&profile.objective)
        .bind(&profile.technical_skills)
        .bind(&profile.soft_skills)
        .bind(&profile.all_skills)
        .bind(profile.total_years_experience)
        .bind(&profile.work_experience)
        .bind(&profile.education)
        .bind(&profile.certifications)
        .bind(&profile.projects)
        .bind(&profile.links)
        .bind(&profile.languages)
        .bind(&profile.achievements)
        .bind(profile.last_resume_id)
        .bind(profile.last_synced_at)
        .bind(profile.completeness)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
