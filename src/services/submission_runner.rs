//! Submission runner
//!
//! Runs one submission end to end: extract from photo 1, then save the
//! extracted data with both photos. The two calls are strictly sequential
//! and the first failure ends the run.

use crate::debug_logger::{DebugLogger, LogLevel};
use crate::error::SubmissionError;
use crate::submission_client::SubmissionClient;
use crate::types::{SubmissionOutcome, SubmissionTask};
use std::sync::Arc;
use uuid::Uuid;

/// Service for running submissions
pub struct SubmissionRunner {
    client: Arc<SubmissionClient>,
    logger: Arc<DebugLogger>,
}

impl SubmissionRunner {
    pub fn new(client: Arc<SubmissionClient>, logger: Arc<DebugLogger>) -> Self {
        Self { client, logger }
    }

    pub fn logger(&self) -> &Arc<DebugLogger> {
        &self.logger
    }

    /// Run a submission in the background style: no result, only log lines.
    ///
    /// Every failure is caught here and logged as an error.
    pub async fn run(&self, task: SubmissionTask) {
        let task_id = Uuid::new_v4().to_string();

        if let Err(e) = self.execute_with_id(&task, &task_id).await {
            self.log(
                LogLevel::Error,
                &task_id,
                format!("An error occurred during the background submission: {}", e),
            );
        }
    }

    /// Run a submission and return its outcome instead of logging it
    pub async fn execute(&self, task: &SubmissionTask) -> Result<SubmissionOutcome, SubmissionError> {
        let task_id = Uuid::new_v4().to_string();
        self.execute_with_id(task, &task_id).await
    }

    async fn execute_with_id(
        &self,
        task: &SubmissionTask,
        task_id: &str,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        self.log(LogLevel::Info, task_id, "Starting submission...".to_string());

        // Step 1: Extract Data
        self.log(LogLevel::Info, task_id, "Sending image for extraction...".to_string());
        let extracted_data = self.client
            .extract(&task.destination, &task.photo1)
            .await?;
        self.log(LogLevel::Info, task_id, "Extraction successful.".to_string());

        // Step 2: Save Data
        self.log(LogLevel::Info, task_id, "Sending extracted data to be saved...".to_string());
        self.client
            .save(&task.destination, extracted_data.as_ref(), &task.photo1, &task.photo2)
            .await?;

        self.log(
            LogLevel::Info,
            task_id,
            "Submission process completed successfully.".to_string(),
        );

        Ok(SubmissionOutcome { extracted_data })
    }

    fn log(&self, level: LogLevel, task_id: &str, message: String) {
        self.logger.log(
            level,
            message,
            Some(serde_json::json!({ "task_id": task_id })),
        );
    }
}
