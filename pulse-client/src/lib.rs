//! Native client for the DecisionPulse analytics API.
//!
//! Implements [`pulse_core::Transport`] with reqwest so the CLI runs the
//! same upload contract as the browser dashboard.

use std::path::Path;
use std::time::Duration;

use pulse_core::upload::FILE_FIELD;
use pulse_core::{ApiConfig, HttpReply, Transport, UploadError};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// A CSV read into memory, ready to be sent as a multipart part.
#[derive(Clone, Debug)]
pub struct CsvUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CsvUpload {
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self { file_name: file_name_of(path), bytes })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string())
}

/// Answer from `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Deserialize)]
struct HealthEnvelope {
    data: HealthStatus,
}

pub fn parse_health_response(reply: &HttpReply) -> Result<HealthStatus, UploadError> {
    if !reply.is_success() {
        return Err(UploadError::Status(reply.status));
    }
    serde_json::from_str::<HealthEnvelope>(&reply.body)
        .map(|env| env.data)
        .map_err(|e| UploadError::Decode(e.to_string()))
}

pub struct PulseClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl PulseClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    pub fn with_timeout(config: ApiConfig, timeout: Duration) -> Result<Self, UploadError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn health(&self) -> Result<HealthStatus, UploadError> {
        let url = self.config.health_url();
        log::debug!("GET {url}");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| UploadError::Transport(format!("HTTP request failed: {e}")))?;
        parse_health_response(&into_reply(resp).await?)
    }
}

async fn into_reply(resp: reqwest::Response) -> Result<HttpReply, UploadError> {
    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .map_err(|e| UploadError::Transport(format!("Failed to read response body: {e}")))?;
    Ok(HttpReply { status, body })
}

impl Transport for PulseClient {
    type File = CsvUpload;

    async fn post_file(&self, url: &str, file: &CsvUpload) -> Result<HttpReply, UploadError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str("text/csv")
            .map_err(|e| UploadError::Transport(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        log::debug!("POST {url} ({} bytes)", file.bytes.len());
        let resp = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(format!("HTTP request failed: {e}")))?;
        into_reply(resp).await
    }
}
