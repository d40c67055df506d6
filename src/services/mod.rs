//! Service layer for background submissions
//!
//! - `submission_runner`: the two-step extract/save chain for one task
//! - `submission_worker`: message-driven entry point that starts runs

pub mod submission_runner;
pub mod submission_worker;

pub use submission_runner::SubmissionRunner;
pub use submission_worker::SubmissionWorker;
