use clap::{value_parser, Arg, ArgAction, Command};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use photo_submitter::config_utils::{get_logs_dir, SubmitterConfig};
use photo_submitter::logging::init_tracing;
use photo_submitter::{build_runner, DebugLogger, SubmissionTask};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let matches = Command::new("photo-submitter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Send two photos for extraction and storage")
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .help("Destination address (defaults to PHOTO_SUBMITTER_ENDPOINT or the config file)"),
        )
        .arg(Arg::new("log-level").long("log-level"))
        .arg(Arg::new("json-logs").long("json-logs").action(ArgAction::SetTrue))
        .arg(
            Arg::new("save-report")
                .long("save-report")
                .help("Write a JSON debug report to the logs directory")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("photo1")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("photo2")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg_required_else_help(true)
        .get_matches();

    let config = SubmitterConfig::load()?;

    let level = matches
        .get_one::<String>("log-level")
        .cloned()
        .unwrap_or_else(|| config.log_level.clone());
    let json_logs = matches.get_flag("json-logs") || config.json_logs;
    let file_log_dir = config.file_log_dir()?;
    let _guard = init_tracing(&level, json_logs, file_log_dir.as_deref());

    let endpoint = config
        .resolve_endpoint(matches.get_one::<String>("endpoint").map(String::as_str))
        .ok_or("No endpoint configured: pass --endpoint or set PHOTO_SUBMITTER_ENDPOINT")?;

    let photo1_path = matches
        .get_one::<PathBuf>("photo1")
        .ok_or("photo1 is required")?;
    let photo2_path = matches
        .get_one::<PathBuf>("photo2")
        .ok_or("photo2 is required")?;

    let photo1 = fs::read(photo1_path)
        .map_err(|e| format!("Failed to read {}: {}", photo1_path.display(), e))?;
    let photo2 = fs::read(photo2_path)
        .map_err(|e| format!("Failed to read {}: {}", photo2_path.display(), e))?;

    let logger = Arc::new(DebugLogger::new());
    let runner = build_runner(logger.clone());
    runner.run(SubmissionTask::from_image_bytes(endpoint, &photo1, &photo2)).await;

    if matches.get_flag("save-report") {
        let logs_dir = match file_log_dir {
            Some(dir) => dir,
            None => get_logs_dir()?,
        };
        let path = logger.save_report_to_dir(&logs_dir)?;
        tracing::info!("Debug report written to {}", path.display());
    }

    if logger.get_error_count() > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
