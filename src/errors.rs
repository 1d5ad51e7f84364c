use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::Display;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input. Carries the offending fields.
    Validation(Vec<FieldError>),
    /// Bad credentials. The message never distinguishes unknown email
    /// from wrong password.
    Unauthorized,
    /// Absent resource, or a resource owned by another account. The two
    /// cases are indistinguishable to the caller.
    NotFound(String),
    /// The extraction service is unreachable or returned a failure.
    Upstream {
        status: Option<u16>,
        message: String,
    },
    /// Anything unexpected. The detail is logged, never returned.
    Internal(String),
}

impl AppError {
    pub fn validation(field: &str, message: &str) -> Self {
        AppError::Validation(vec![FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }])
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => {
                let messages = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::Unauthorized => write!(f, "Invalid credentials"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Upstream { status, message } => match status {
                Some(code) => write!(f, "Upstream failure ({}): {}", code, message),
                None => write!(f, "Upstream failure: {}", message),
            },
            AppError::Internal(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => {
                serde_json::json!({
                    "success": false,
                    "error": "Validation failed",
                    "details": errors
                })
            }
            AppError::Unauthorized => {
                serde_json::json!({
                    "success": false,
                    "error": "Invalid credentials"
                })
            }
            AppError::NotFound(msg) => {
                serde_json::json!({
                    "success": false,
                    "error": msg
                })
            }
            AppError::Upstream { status, message } => {
                // The upstream status is the one piece of internal detail
                // the boundary lets through, for operator diagnosis.
                serde_json::json!({
                    "success": false,
                    "error": message,
                    "upstream_status": status
                })
            }
            AppError::Internal(detail) => {
                tracing::error!("internal error: {}", detail);
                serde_json::json!({
                    "success": false,
                    "error": "Internal server error"
                })
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        AppError::Validation(field_errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(format!("Database error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenCreation => AppError::Internal("Token creation failed".into()),
            _ => AppError::Unauthorized,
        }
    }
}

#[derive(Debug, Display)]
pub enum AuthError {
    #[display("Invalid token")]
    InvalidToken,

    #[display("Token expired")]
    TokenExpired,

    #[display("Missing credentials")]
    MissingCredentials,

    #[display("Token creation error")]
    TokenCreation,

    #[display("Invalid account ID in token")]
    InvalidAccountId,
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        // One uniform body for every authentication failure.
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": "Authentication required"
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

#[derive(Debug, Display)]
pub enum PasswordError {
    #[display("Invalid password parameters: {_0}")]
    InvalidParameters(String),

    #[display("Password hashing failed: {_0}")]
    HashingError(String),

    #[display("Invalid password hash format: {_0}")]
    InvalidHashFormat(String),

    #[display("Password verification failed: {_0}")]
    VerificationError(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
