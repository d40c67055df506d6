//! Background submission worker
//!
//! Accepts submission tasks as messages and starts one independent run per
//! message. Posting never waits for a run and never reports its result.

use crate::error::SubmissionError;
use crate::services::submission_runner::SubmissionRunner;
use crate::types::SubmissionTask;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

pub struct SubmissionWorker {
    sender: mpsc::UnboundedSender<SubmissionTask>,
    handle: JoinHandle<()>,
}

impl SubmissionWorker {
    /// Start the worker loop on the current tokio runtime
    pub fn spawn(runner: Arc<SubmissionRunner>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<SubmissionTask>();

        let handle = tokio::spawn(async move {
            let mut in_flight = JoinSet::new();

            loop {
                tokio::select! {
                    message = receiver.recv() => match message {
                        Some(task) => {
                            let runner = runner.clone();
                            in_flight.spawn(async move { runner.run(task).await });
                        }
                        None => break,
                    },
                    // Reap finished runs so the set does not grow unbounded
                    Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
                }
            }

            // Runs are never cancelled; wait for the ones still going
            while in_flight.join_next().await.is_some() {}
        });

        Self { sender, handle }
    }

    /// Hand a task to the worker. Returns as soon as it is queued.
    pub fn post_message(&self, task: SubmissionTask) -> Result<(), SubmissionError> {
        self.sender
            .send(task)
            .map_err(|_| SubmissionError::WorkerClosed)
    }

    /// Stop accepting tasks and wait for in-flight runs to finish
    pub async fn shutdown(self) {
        drop(self.sender);
        let _ = self.handle.await;
    }
}
