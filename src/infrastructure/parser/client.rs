use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::constants::{PARSER_ENDPOINT, PARSER_TIMEOUT_SECS, PDF_MIME};
use crate::domain::entities::resume::ExtractedData;
use crate::errors::AppError;

/// Payload returned by the extraction service for a successful parse.
/// Text comes back under `full_text` on current deployments and
/// `raw_text` on older ones; both are kept and reconciled downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedResume {
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub text_length: Option<i32>,
    #[serde(default)]
    pub word_count: Option<i32>,
    #[serde(flatten)]
    pub extracted: ExtractedData,
}

impl ParsedResume {
    pub fn text(&self) -> Option<&str> {
        self.full_text.as_deref().or(self.raw_text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ParseEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<ParsedResume>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
pub trait ResumeParserClient: Send + Sync {
    async fn parse(&self, file_name: &str, bytes: Vec<u8>) -> Result<ParsedResume, AppError>;
}

pub struct HttpParserClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpParserClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(PARSER_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        HttpParserClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ResumeParserClient for HttpParserClient {
    async fn parse(&self, file_name: &str, bytes: Vec<u8>) -> Result<ParsedResume, AppError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(PDF_MIME)
            .map_err(|e| AppError::Internal(format!("multipart build failed: {e}")))?;
        let form = Form::new().part("file", part);

        let url = format!("{}{}", self.base_url, PARSER_ENDPOINT);
        debug!(%url, file_name, "forwarding resume to extraction service");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: None,
                message: format!("extraction service unreachable: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ParseEnvelope>(&body)
                .ok()
                .and_then(|env| env.error)
                .unwrap_or_else(|| format!("extraction service returned {status}"));

            return Err(AppError::Upstream {
                status: Some(status.as_u16()),
                message,
            });
        }

        let envelope: ParseEnvelope =
            response.json().await.map_err(|e| AppError::Upstream {
                status: Some(status.as_u16()),
                message: format!("malformed extraction response: {e}"),
            })?;

        match envelope {
            ParseEnvelope {
                success: true,
                data: Some(parsed),
                ..
            } => Ok(parsed),
            ParseEnvelope { error, .. } => Err(AppError::Upstream {
                status: Some(status.as_u16()),
                message: error.unwrap_or_else(|| "extraction reported failure".into()),
            }),
        }
    }
}
