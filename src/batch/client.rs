use crate::batch::models::UploadRequest;
use crate::batch::orchestrator::{FileSource, ObjectSink};
use crate::error::AgentError;
use crate::local::resolver::{LocalFile, base_name, file_extension};
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

pub const DEFAULT_AGENT_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Blocking client for the agent's HTTP endpoints. Every call is bounded by
/// the timeout given at construction.
pub struct AgentClient {
    http: Client,
    base_url: String,
}

impl AgentClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AgentError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::Config(format!("http client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/{name}", self.base_url)
    }

    pub fn ping(&self) -> Result<String, AgentError> {
        let response = self
            .http
            .post(self.endpoint("ping"))
            .send()
            .map_err(|e| AgentError::Config(format!("agent unreachable at {}: {e}", self.base_url)))?;
        response
            .text()
            .map_err(|e| AgentError::Config(format!("agent answered garbage: {e}")))
    }
}

/// Pulls the `error` field out of a failed agent response, minus `prefix`.
fn error_detail(response: Response, prefix: &str) -> String {
    let status = response.status();
    match response.json::<serde_json::Value>() {
        Ok(body) => match body.get("error").and_then(|e| e.as_str()) {
            Some(message) => message.strip_prefix(prefix).unwrap_or(message).to_string(),
            None => format!("agent answered {status}"),
        },
        Err(_) => format!("agent answered {status}"),
    }
}

impl FileSource for AgentClient {
    fn fetch(&self, path: &str) -> Result<LocalFile, AgentError> {
        let response = self
            .http
            .post(self.endpoint("get-local-file"))
            .json(&serde_json::json!({ "path": path }))
            .send()
            .map_err(|e| AgentError::NotFound(format!("{path}: {e}")))?;

        if !response.status().is_success() {
            return Err(AgentError::NotFound(error_detail(
                response,
                "Error reading local file: ",
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| AgentError::NotFound(format!("{path}: {e}")))?;

        Ok(LocalFile {
            file_name: base_name(path).to_string(),
            extension: file_extension(path),
            bytes: bytes.to_vec(),
        })
    }
}

impl ObjectSink for AgentClient {
    fn upload(&self, request: UploadRequest) -> Result<(), AgentError> {
        let response = self
            .http
            .post(self.endpoint("upload-to-s3"))
            .query(&[("filename", request.name.as_str())])
            .header(CONTENT_TYPE, request.content_type)
            .body(request.bytes)
            .send()
            .map_err(|e| AgentError::Upload(format!("{}: {e}", request.name)))?;

        if !response.status().is_success() {
            return Err(AgentError::Upload(error_detail(
                response,
                "Failed to upload file to S3: ",
            )));
        }
        Ok(())
    }
}
