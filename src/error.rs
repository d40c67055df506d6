use std::fmt;
use thiserror::Error;

/// Which of the two endpoint calls an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Save,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => write!(f, "extract"),
            Stage::Save => write!(f, "save"),
        }
    }
}

/// Everything that can abort a submission.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Invalid destination address {url}: {reason}")]
    InvalidDestination { url: String, reason: String },

    #[error("Failed to serialize {stage} request: {source}")]
    Serialize {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },

    #[error("Network error during {stage}: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse {stage} response (HTTP {status}): {reason}")]
    InvalidResponse {
        stage: Stage,
        status: u16,
        reason: String,
    },

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("submission worker is no longer accepting tasks")]
    WorkerClosed,
}

impl SubmissionError {
    /// Stage the error happened in, if it belongs to one
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SubmissionError::Serialize { stage, .. }
            | SubmissionError::Transport { stage, .. }
            | SubmissionError::InvalidResponse { stage, .. } => Some(*stage),
            SubmissionError::ExtractionFailed(_) => Some(Stage::Extract),
            SubmissionError::SaveFailed(_) => Some(Stage::Save),
            SubmissionError::InvalidDestination { .. } | SubmissionError::WorkerClosed => None,
        }
    }
}

/// Errors from reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find {0} directory")]
    MissingDirectory(&'static str),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
