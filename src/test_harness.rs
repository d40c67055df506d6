//! Integration test harness for a mock extraction endpoint
//!
//! Both actions are POSTed to the same path, so mocks are told apart by the
//! "action" field of the JSON text body.

use crate::submission_client::TEXT_PLAIN_UTF8;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

const EXEC_PATH: &str = "/exec";

/// A test harness that sets up a mock endpoint for integration testing
pub struct TestHarness {
    pub server: ServerGuard,
}

impl TestHarness {
    /// Create a new test harness with a mock server
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        Self { server }
    }

    /// Destination address of the mock endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.url(), EXEC_PATH)
    }

    fn action_mock(&mut self, action: &str) -> Mock {
        self.server.mock("POST", EXEC_PATH)
            .match_header("content-type", TEXT_PLAIN_UTF8)
            .match_body(Matcher::PartialJson(json!({ "action": action })))
    }

    /// Mock a successful "extract" returning `data`
    pub fn mock_extract_success(&mut self, data: serde_json::Value) -> Mock {
        self.action_mock("extract")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({
                "success": true,
                "data": data
            }).to_string())
            .create()
    }

    /// Mock a failed "extract", with or without a message
    pub fn mock_extract_failure(&mut self, message: Option<&str>) -> Mock {
        let body = match message {
            Some(message) => json!({ "success": false, "message": message }),
            None => json!({ "success": false }),
        };
        self.action_mock("extract")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create()
    }

    /// Mock an "extract" answering 200 with a literal body
    pub fn mock_extract_raw(&mut self, body: &str) -> Mock {
        self.action_mock("extract")
            .with_status(200)
            .with_body(body)
            .create()
    }

    /// Mock a successful "save"
    pub fn mock_save_success(&mut self) -> Mock {
        self.action_mock("save")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "success": true }).to_string())
            .create()
    }

    /// Mock a "save" that only accepts the given extracted data and photos
    pub fn mock_save_expecting(
        &mut self,
        extracted_data: serde_json::Value,
        photo1: &str,
        photo2: &str,
    ) -> Mock {
        self.server.mock("POST", EXEC_PATH)
            .match_header("content-type", TEXT_PLAIN_UTF8)
            .match_body(Matcher::Json(json!({
                "action": "save",
                "extractedData": extracted_data,
                "photo1Base64": photo1,
                "photo2Base64": photo2
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "success": true }).to_string())
            .create()
    }

    /// Mock a failed "save", with or without a message
    pub fn mock_save_failure(&mut self, message: Option<&str>) -> Mock {
        let body = match message {
            Some(message) => json!({ "success": false, "message": message }),
            None => json!({ "success": false }),
        };
        self.action_mock("save")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create()
    }

    /// Mock a "save" answering with an arbitrary status and body
    pub fn mock_save_raw(&mut self, status: usize, body: &str) -> Mock {
        self.action_mock("save")
            .with_status(status)
            .with_body(body)
            .create()
    }

    /// Mock a "save" that must not be reached
    pub fn mock_save_never_called(&mut self) -> Mock {
        self.server.mock("POST", EXEC_PATH)
            .match_body(Matcher::PartialJson(json!({ "action": "save" })))
            .with_status(200)
            .with_body(json!({ "success": true }).to_string())
            .expect(0)
            .create()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Stage, SubmissionError};
    use crate::submission_client::SubmissionClient;

    #[tokio::test]
    async fn test_extract_with_mock_server() {
        let mut harness = TestHarness::new().await;
        let mock = harness.mock_extract_success(json!({"total": 12.5}));

        let client = SubmissionClient::new();
        let result = client.extract(&harness.endpoint(), "cGhvdG8x").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), Some(json!({"total": 12.5})));
    }

    #[tokio::test]
    async fn test_extract_sends_plain_text_body() {
        let mut harness = TestHarness::new().await;
        let mock = harness.server.mock("POST", EXEC_PATH)
            .match_header("content-type", "text/plain;charset=utf-8")
            .match_body(Matcher::Exact(r#"{"action":"extract","photo1Base64":"cGhvdG8x"}"#.to_string()))
            .with_status(200)
            .with_body(r#"{"success":true,"data":null}"#)
            .create();

        let client = SubmissionClient::new();
        let result = client.extract(&harness.endpoint(), "cGhvdG8x").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), Some(serde_json::Value::Null));
    }

    #[tokio::test]
    async fn test_save_forwards_extracted_data_unmodified() {
        let mut harness = TestHarness::new().await;
        let extracted = json!({
            "store": "Corner Shop",
            "items": [{"name": "bread", "qty": 2}],
            "meta": {"confidence": 0.93, "notes": null}
        });
        let mock = harness.mock_save_expecting(extracted.clone(), "cGhvdG8x", "cGhvdG8y");

        let client = SubmissionClient::new();
        let result = client.save(&harness.endpoint(), Some(&extracted), "cGhvdG8x", "cGhvdG8y").await;

        mock.assert_async().await;
        tokio_test::assert_ok!(result);
    }

    #[tokio::test]
    async fn test_save_failure_message() {
        let mut harness = TestHarness::new().await;
        let _mock = harness.mock_save_failure(Some("quota exceeded"));

        let client = SubmissionClient::new();
        let extracted = json!({});
        let result = client.save(&harness.endpoint(), Some(&extracted), "a", "b").await;

        let err = tokio_test::assert_err!(result);
        assert_eq!(err.to_string(), "Save failed: quota exceeded");
    }

    #[tokio::test]
    async fn test_error_status_with_success_body_is_not_a_failure() {
        let mut harness = TestHarness::new().await;
        let _mock = harness.action_mock("extract")
            .with_status(500)
            .with_body(r#"{"success":true,"data":{"total":3}}"#)
            .create();

        let client = SubmissionClient::new();
        let result = client.extract(&harness.endpoint(), "a").await;

        assert_eq!(result.unwrap(), Some(json!({"total": 3})));
    }

    #[tokio::test]
    async fn test_unparsable_extract_response() {
        let mut harness = TestHarness::new().await;
        let _mock = harness.action_mock("extract")
            .with_status(200)
            .with_body("<html>Moved</html>")
            .create();

        let client = SubmissionClient::new();
        let err = client.extract(&harness.endpoint(), "a").await.unwrap_err();

        match err {
            SubmissionError::InvalidResponse { stage, status, .. } => {
                assert_eq!(stage, Stage::Extract);
                assert_eq!(status, 200);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
