use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// One background submission: where to send it and the two encoded photos.
///
/// Field names follow the message posted by the page that starts a
/// submission, so a task can be deserialized straight from that message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionTask {
    #[serde(rename = "appsScriptUrl")]
    pub destination: String,
    #[serde(rename = "photo1Base64")]
    pub photo1: String,
    #[serde(rename = "photo2Base64")]
    pub photo2: String,
}

impl SubmissionTask {
    pub fn new(destination: impl Into<String>, photo1: impl Into<String>, photo2: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            photo1: photo1.into(),
            photo2: photo2.into(),
        }
    }

    /// Build a task from raw image bytes, base64-encoding both photos
    pub fn from_image_bytes(destination: impl Into<String>, photo1: &[u8], photo2: &[u8]) -> Self {
        Self::new(destination, STANDARD.encode(photo1), STANDARD.encode(photo2))
    }
}

/// What a successful submission went through
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    /// Data the endpoint extracted from the first photo, if it sent any
    pub extracted_data: Option<serde_json::Value>,
}
