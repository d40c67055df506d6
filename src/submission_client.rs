use crate::api_contracts::{ExtractResponse, SaveResponse, SubmissionRequest};
use crate::debug_logger::DebugLogger;
use crate::error::{Stage, SubmissionError};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Content type for both calls.
///
/// The endpoint cannot answer a CORS preflight, and `application/json` would
/// trigger one in a browser. The body is still JSON text.
pub const TEXT_PLAIN_UTF8: &str = "text/plain;charset=utf-8";

/// API client for the extraction endpoint
pub struct SubmissionClient {
    client: reqwest::Client,
    logger: Option<Arc<DebugLogger>>,
}

impl SubmissionClient {
    pub fn new() -> Self {
        Self::with_logger(None)
    }

    /// Create a client with an optional logger for request tracing
    pub fn with_logger(logger: Option<Arc<DebugLogger>>) -> Self {
        // No timeout: the network layer default applies.
        // Include version in User-Agent header for tracking
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("PhotoSubmitter/{}", version);

        let client = reqwest::Client::builder()
            .user_agent(&user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, logger }
    }

    /// Send photo 1 for extraction and return the extracted data.
    ///
    /// `None` means the reply had no "data" key at all.
    pub async fn extract(&self, destination: &str, photo1: &str) -> Result<Option<Value>, SubmissionError> {
        let request = SubmissionRequest::Extract { photo1_base64: photo1 };

        let result: ExtractResponse = self.post_text(destination, Stage::Extract, &request).await?;

        if !result.success {
            return Err(SubmissionError::ExtractionFailed(result.failure_message()));
        }

        Ok(result.data)
    }

    /// Send the extracted data and both photos to be saved
    pub async fn save(
        &self,
        destination: &str,
        extracted_data: Option<&Value>,
        photo1: &str,
        photo2: &str,
    ) -> Result<(), SubmissionError> {
        let request = SubmissionRequest::Save {
            extracted_data,
            photo1_base64: photo1,
            photo2_base64: photo2,
        };

        let result: SaveResponse = self.post_text(destination, Stage::Save, &request).await?;

        if !result.success {
            return Err(SubmissionError::SaveFailed(result.failure_message()));
        }

        Ok(())
    }

    /// POST a request as JSON text and parse the JSON reply.
    ///
    /// The status code is not checked: the endpoint reports failures through
    /// the `success` flag, so the body is parsed whatever the status.
    async fn post_text<T: DeserializeOwned>(
        &self,
        destination: &str,
        stage: Stage,
        request: &SubmissionRequest<'_>,
    ) -> Result<T, SubmissionError> {
        let url = parse_destination(destination)?;

        let body = serde_json::to_string(request)
            .map_err(|source| SubmissionError::Serialize { stage, source })?;

        if let Some(ref logger) = self.logger {
            logger.debug(format!(
                "Sending {} request ({} bytes) to: {}",
                request.action(),
                body.len(),
                url
            ));
        }

        let response = self.client
            .post(url)
            .header(CONTENT_TYPE, TEXT_PLAIN_UTF8)
            .body(body)
            .send()
            .await
            .map_err(|source| SubmissionError::Transport { stage, source })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| SubmissionError::Transport { stage, source })?;

        serde_json::from_str(&text).map_err(|e| SubmissionError::InvalidResponse {
            stage,
            status: status.as_u16(),
            reason: e.to_string(),
        })
    }
}

impl Default for SubmissionClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate the destination as an absolute http(s) URL
fn parse_destination(destination: &str) -> Result<reqwest::Url, SubmissionError> {
    let url = reqwest::Url::parse(destination).map_err(|e| SubmissionError::InvalidDestination {
        url: destination.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SubmissionError::InvalidDestination {
            url: destination.to_string(),
            reason: format!("unsupported scheme {}", other),
        }),
    }
}
