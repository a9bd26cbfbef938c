//! Remote analysis service client.
//!
//! `POST {endpoint}` with `{"text": ...}`. A 2xx response carries an
//! [`AnalysisResult`]; anything else carries `{"error": ...}` if the service
//! had something to say.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::AnalysisResult;

/// Path the service is mounted at.
pub const ANALYZE_PATH: &str = "/api/index";

/// Failures of one analysis call.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Non-2xx response. `message` is the service's own error text.
    #[error("{}", status_message(.status, .message))]
    Status { status: u16, message: Option<String> },

    #[error("network unreachable: {0}")]
    Transport(String),

    #[error("unexpected response format: {0}")]
    Decode(String),
}

fn status_message(status: &u16, message: &Option<String>) -> String {
    match message.as_deref() {
        Some(msg) if !msg.trim().is_empty() => msg.to_string(),
        _ => format!("server error: {status}"),
    }
}

impl RemoteError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Anything that can turn feedback text into an analysis result.
pub trait AnalysisService {
    fn analyze(&self, text: &str) -> Result<AnalysisResult, RemoteError>;
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Blocking HTTP client for the analysis service.
pub struct HttpAnalysisService {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpAnalysisService {
    /// `endpoint` is the full URL to post to. No request timeout is set:
    /// a call ends only on a response or a transport failure.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RemoteError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .user_agent(concat!("feedlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AnalysisService for HttpAnalysisService {
    fn analyze(&self, text: &str) -> Result<AnalysisResult, RemoteError> {
        tracing::info!(endpoint = %self.endpoint, bytes = text.len(), "posting analysis request");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&AnalyzeRequest { text })
            .send()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            // The body is optional; an unreadable one just means no message.
            let message = resp
                .text()
                .ok()
                .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
                .and_then(|body| body.error);
            tracing::warn!(status = status.as_u16(), ?message, "analysis request failed");
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<AnalysisResult>()
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_without_body_mentions_code() {
        let err = RemoteError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "server error: 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn status_with_service_message_uses_it() {
        let err = RemoteError::Status {
            status: 400,
            message: Some("text field cannot be empty".into()),
        };
        assert_eq!(err.to_string(), "text field cannot be empty");
    }

    #[test]
    fn blank_service_message_falls_back_to_status() {
        let err = RemoteError::Status {
            status: 502,
            message: Some("  ".into()),
        };
        assert_eq!(err.to_string(), "server error: 502");
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_string(&AnalyzeRequest { text: "a\nb" }).unwrap();
        assert_eq!(body, r#"{"text":"a\nb"}"#);
    }
}
