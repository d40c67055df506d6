/**
 * API Contract Types for the submission endpoint
 *
 * These types define the exact structure of the request/response bodies
 * exchanged with the extraction endpoint. Both actions are POSTed to the
 * same URL and told apart by the "action" field.
 *
 * Principles:
 * - Field names match the endpoint's JSON exactly (camelCase)
 * - A missing, null or falsy "success" flag is a failure
 * - Extracted data is opaque and passed back untouched; when the endpoint
 *   sent no "data" key, "extractedData" is left out of the save body too
 */

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// Requests
// =============================================================================

/// Request body sent to the endpoint, tagged by "action"
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum SubmissionRequest<'a> {
    #[serde(rename_all = "camelCase")]
    Extract {
        photo1_base64: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    Save {
        #[serde(skip_serializing_if = "Option::is_none")]
        extracted_data: Option<&'a Value>,
        photo1_base64: &'a str,
        photo2_base64: &'a str,
    },
}

impl SubmissionRequest<'_> {
    /// Action tag as it appears on the wire
    pub fn action(&self) -> &'static str {
        match self {
            SubmissionRequest::Extract { .. } => "extract",
            SubmissionRequest::Save { .. } => "save",
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Response from the "extract" action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractResponse {
    #[serde(default, deserialize_with = "truthy_flag")]
    pub success: bool,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,    // None only when the key is absent; null stays Some(Null)
    #[serde(default)]
    pub message: Option<Value>,
}

/// Response from the "save" action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveResponse {
    #[serde(default, deserialize_with = "truthy_flag")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<Value>,
}

/// Text used when the endpoint reports failure without a message
pub const UNKNOWN_ERROR: &str = "unknown error";

impl ExtractResponse {
    pub fn failure_message(&self) -> String {
        render_message(self.message.as_ref())
    }
}

impl SaveResponse {
    pub fn failure_message(&self) -> String {
        render_message(self.message.as_ref())
    }
}

/// Strings are used as-is, other JSON values in their JSON form
fn render_message(message: Option<&Value>) -> String {
    match message {
        None | Some(Value::Null) => UNKNOWN_ERROR.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read the flag the way the endpoint's callers test it: null, false, 0 and
/// the empty string are failures, anything else is success.
fn truthy_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Keep an explicit null as `Some(Value::Null)`; only a missing key is `None`
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}
