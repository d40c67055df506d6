pub mod api_contracts;
pub mod config_utils;
pub mod debug_logger;
pub mod error;
pub mod logging;
pub mod services;
pub mod submission_client;
pub mod types;

#[cfg(test)]
mod test_harness;

use std::sync::Arc;

pub use config_utils::SubmitterConfig;
pub use debug_logger::{DebugLogger, LogLevel};
pub use error::{ConfigError, Stage, SubmissionError};
pub use services::{SubmissionRunner, SubmissionWorker};
pub use submission_client::SubmissionClient;
pub use types::{SubmissionOutcome, SubmissionTask};

/// Build a runner that logs into `logger`
pub fn build_runner(logger: Arc<DebugLogger>) -> SubmissionRunner {
    let client = Arc::new(SubmissionClient::with_logger(Some(logger.clone())));
    SubmissionRunner::new(client, logger)
}

/// Start a submission in the background and return immediately.
///
/// Must be called from within a tokio runtime. The outcome is only visible
/// through `logger`.
pub fn submit_in_background(task: SubmissionTask, logger: Arc<DebugLogger>) -> tokio::task::JoinHandle<()> {
    let runner = build_runner(logger);
    tokio::spawn(async move { runner.run(task).await })
}
