//! Helix chat sessions: one POST per report, answered with a session id.

use crate::config::HelixConfig;
use crate::error::{ReporterError, Result};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const CHAT_PATH: &str = "/api/v1/sessions/chat";

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub app_id: &'a str,
    /// Always empty: every report opens a new session.
    pub session_id: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
pub struct MessageContent<'a> {
    pub content_type: &'a str,
    pub parts: Vec<&'a str>,
}

impl<'a> ChatRequest<'a> {
    pub fn new(app_id: &'a str, text: &'a str) -> Self {
        Self {
            app_id,
            session_id: "",
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent {
                    content_type: "text",
                    parts: vec![text],
                },
            }],
        }
    }
}

pub struct HelixClient {
    config: HelixConfig,
    http: reqwest::Client,
}

impl HelixClient {
    pub fn new(config: HelixConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(ReporterError::Network)?;
        Ok(Self { config, http })
    }

    pub fn chat_url(&self) -> String {
        format!("{}{}", self.config.base_url, CHAT_PATH)
    }

    pub fn session_url(&self, id: &str) -> String {
        format!("{}/session/{}", self.config.base_url, id)
    }

    /// Open a session with `report` as its first user message and return the
    /// URL a human can follow.
    pub async fn send(&self, report: &str) -> Result<String> {
        let url = self.chat_url();
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&ChatRequest::new(&self.config.app_id, report))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(ReporterError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let id = session_id(&body)?;
        Ok(self.session_url(&id))
    }
}

fn transport_error(e: reqwest::Error) -> ReporterError {
    if e.is_timeout() {
        ReporterError::Timeout {
            what: "waiting for Helix".to_string(),
            secs: HTTP_TIMEOUT.as_secs(),
        }
    } else {
        ReporterError::Network(e)
    }
}

/// Pull `id` out of a session response body. Empty strings and zero are
/// treated as no id at all.
pub fn session_id(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ReporterError::ResponseFormat(format!("invalid JSON ({}): {}", e, body)))?;

    match value.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) if id.as_f64() != Some(0.0) => Ok(id.to_string()),
        _ => {
            let pretty = serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string());
            Err(ReporterError::ResponseFormat(format!(
                "no session ID returned from Helix: {}",
                pretty
            )))
        }
    }
}
