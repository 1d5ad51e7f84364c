use actix_multipart::form::{bytes::Bytes as MultipartBytes, MultipartForm};
use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;

use crate::domain::entities::resume::ResumeDetail;
use crate::domain::use_cases::extractors::AuthClaims;
use crate::domain::use_cases::ingestion::UploadedFile;
use crate::errors::AppError;
use crate::AppState;

/// The transport cap is above the domain limit on purpose: an oversize
/// file should reach the validator and get the proper error body, not a
/// bare multipart rejection.
#[derive(MultipartForm)]
pub struct ResumeUploadForm {
    #[multipart(rename = "file", limit = "10MB")]
    pub file: MultipartBytes,
}

#[post("/upload")]
pub async fn upload(
    state: web::Data<AppState>,
    claims: AuthClaims,
    MultipartForm(form): MultipartForm<ResumeUploadForm>,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.0.account_id()?;

    let file = UploadedFile {
        file_name: form
            .file
            .file_name
            .clone()
            .unwrap_or_else(|| "resume.pdf".to_string()),
        content_type: form
            .file
            .content_type
            .as_ref()
            .map(|mime| mime.essence_str().to_string()),
        bytes: form.file.data.to_vec(),
    };

    let outcome = state.ingestion.ingest(account_id, file).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "message": "Resume uploaded and parsed",
        "data": ResumeDetail::from(outcome.resume),
        "profile_sync": outcome.profile_sync
    })))
}

#[get("/list")]
pub async fn list(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.0.account_id()?;
    let resumes = state.resumes.list(account_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "count": resumes.len(),
        "data": resumes
    })))
}

#[get("/{id}")]
pub async fn get_one(
    state: web::Data<AppState>,
    claims: AuthClaims,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.0.account_id()?;
    let detail = state.resumes.get(path.into_inner(), account_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": detail
    })))
}

#[delete("/{id}")]
pub async fn delete_one(
    state: web::Data<AppState>,
    claims: AuthClaims,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.0.account_id()?;
    state.resumes.delete(path.into_inner(), account_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Resume deleted"
    })))
}
