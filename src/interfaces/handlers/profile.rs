use actix_web::{get, patch, web, HttpResponse};

use crate::domain::entities::profile::ProfilePatch;
use crate::domain::use_cases::extractors::AuthClaims;
use crate::errors::AppError;
use crate::AppState;

#[get("")]
pub async fn get_profile(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.0.account_id()?;

    match state.profiles.get(account_id).await? {
        Some(profile) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "exists": true,
            "data": profile
        }))),
        None => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "exists": false,
            "message": "No profile yet. Upload a resume to create one."
        }))),
    }
}

#[patch("")]
pub async fn update_profile(
    state: web::Data<AppState>,
    claims: AuthClaims,
    body: web::Json<ProfilePatch>,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.0.account_id()?;
    let completeness = state.profiles.apply_patch(account_id, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Profile updated",
        "data": { "completeness": completeness }
    })))
}
