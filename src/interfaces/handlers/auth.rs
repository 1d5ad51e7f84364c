use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    post, web, HttpResponse,
};

use crate::constants::{SESSION_TTL_DAYS, TOKEN_COOKIE};
use crate::domain::entities::account::{LoginRequest, SignupRequest};
use crate::errors::AppError;
use crate::AppState;

fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(CookieDuration::days(SESSION_TTL_DAYS))
        .finish()
}

#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let session = state.auth.signup(body.into_inner()).await?;
    let cookie = session_cookie(&session.token, state.cookie_secure);

    Ok(HttpResponse::Created().cookie(cookie).json(serde_json::json!({
        "success": true,
        "message": "Account created successfully",
        "token": session.token,
        "user": session.account
    })))
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let session = state.auth.login(body.into_inner()).await?;
    let cookie = session_cookie(&session.token, state.cookie_secure);

    Ok(HttpResponse::Ok().cookie(cookie).json(serde_json::json!({
        "success": true,
        "message": "Login successful",
        "token": session.token,
        "user": session.account
    })))
}
