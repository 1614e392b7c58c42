use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::sync::Arc;

use crate::error::BackendError;
use crate::intake::loader;
use crate::state::data::{Reply, SubmitRequest, NO_ANSWER_PLACEHOLDER};

/// HTTP client for the predict endpoint
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct VqaClient {
    http: reqwest::Client,
    endpoint: String,
}

impl VqaClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload the image with the question and wait for the answer.
    ///
    /// No timeout and no retry: the call resolves whenever the backend (or
    /// the transport) does.
    pub async fn ask(self, request: SubmitRequest) -> Result<Reply, BackendError> {
        let image = &request.image;
        let image_bytes = loader::read_bytes(image.path.clone())
            .await
            .map_err(|source| BackendError::ReadImage {
                path: image.path.clone(),
                source: Arc::new(source),
            })?;

        let part = Part::bytes(image_bytes.clone())
            .file_name(image.name.clone())
            .mime_str(image.mime)
            .map_err(|_| BackendError::InvalidMime(image.mime.to_string()))?;
        let form = Form::new()
            .part("image", part)
            .text("question", request.question.clone());

        tracing::info!(
            endpoint = %self.endpoint,
            image = %image.name,
            bytes = image_bytes.len(),
            question = %request.question,
            "submitting VQA request"
        );

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let answer = parse_answer(&body)?;
        tracing::info!(chars = answer.chars().count(), "answer received");

        Ok(Reply {
            answer,
            image_bytes,
        })
    }
}

/// Pull the answer out of a reply body.
///
/// The body must be JSON. A missing, empty, or non-string `answer` is not
/// an error; it becomes the placeholder text.
pub fn parse_answer(body: &[u8]) -> Result<String, BackendError> {
    let value: Value = serde_json::from_slice(body)?;
    let answer = value
        .get("answer")
        .and_then(Value::as_str)
        .filter(|answer| !answer.is_empty())
        .unwrap_or(NO_ANSWER_PLACEHOLDER);
    Ok(answer.to_string())
}
