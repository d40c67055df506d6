use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Keep last 1000 entries to avoid memory issues
const MAX_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugLogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugReport {
    pub generated_at: String,
    pub app_version: String,
    pub error_count: usize,
    pub log_entries: Vec<DebugLogEntry>,
}

/// Captures log lines in memory and forwards them to `tracing`.
pub struct DebugLogger {
    logs: Arc<Mutex<Vec<DebugLogEntry>>>,
    error_count: Arc<Mutex<usize>>,
}

impl DebugLogger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            error_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn log(&self, level: LogLevel, message: String, context: Option<serde_json::Value>) {
        let ctx = context.as_ref().map(|c| c.to_string()).unwrap_or_default();
        match level {
            LogLevel::Debug => tracing::debug!(context = %ctx, "{}", message),
            LogLevel::Info => tracing::info!(context = %ctx, "{}", message),
            LogLevel::Warn => tracing::warn!(context = %ctx, "{}", message),
            LogLevel::Error => tracing::error!(context = %ctx, "{}", message),
        }

        let entry = DebugLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            level,
            message,
            context,
        };

        if level == LogLevel::Error {
            if let Ok(mut count) = self.error_count.lock() {
                *count += 1;
            }
        }

        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() >= MAX_ENTRIES {
                logs.remove(0);
            }
            logs.push(entry);
        }
    }

    pub fn info(&self, message: String) {
        self.log(LogLevel::Info, message, None);
    }

    pub fn warn(&self, message: String) {
        self.log(LogLevel::Warn, message, None);
    }

    pub fn error(&self, message: String) {
        self.log(LogLevel::Error, message, None);
    }

    pub fn debug(&self, message: String) {
        self.log(LogLevel::Debug, message, None);
    }

    pub fn get_error_count(&self) -> usize {
        *self.error_count.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the captured entries, oldest first
    pub fn entries(&self) -> Vec<DebugLogEntry> {
        self.logs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether any captured entry at `level` contains `needle`
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.logs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|entry| entry.level == level && entry.message.contains(needle))
    }

    pub fn generate_report(&self) -> DebugReport {
        DebugReport {
            generated_at: Utc::now().to_rfc3339(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            error_count: self.get_error_count(),
            log_entries: self.entries(),
        }
    }

    /// Write the report as pretty JSON into `logs_dir`, creating it if needed
    pub fn save_report_to_dir(&self, logs_dir: &Path) -> Result<PathBuf, String> {
        let report = self.generate_report();

        fs::create_dir_all(logs_dir)
            .map_err(|e| format!("Failed to create logs directory: {}", e))?;

        // Generate filename with timestamp
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("debug_log_{}.json", timestamp);
        let log_path = logs_dir.join(&filename);

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {}", e))?;

        let mut file = File::create(&log_path)
            .map_err(|e| format!("Failed to create log file: {}", e))?;

        file.write_all(json.as_bytes())
            .map_err(|e| format!("Failed to write to log file: {}", e))?;

        Ok(log_path)
    }
}

impl Default for DebugLogger {
    fn default() -> Self {
        Self::new()
    }
}
