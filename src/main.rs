// davsync/src/main.rs
use anyhow::{Context, Result};
use chrono::Local;
use clap::ArgMatches;
use std::process::ExitCode;

use davsync::config::{self, SyncConfig};
use davsync::logging::RunLog;
use davsync::sync;

/// Main entry point for the sync tool
#[tokio::main]
async fn main() -> ExitCode {
    match run_app().await {
        Ok(_) => {
            println!("✅ Sync completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app() -> Result<()> {
    let matches: ArgMatches = config::cli().get_matches();
    let sync_config =
        SyncConfig::from_matches(&matches).context("Failed to load sync configuration")?;

    // The log file lives inside the local folder, next to the files it
    // describes. If its name matches the mask it is a candidate like any
    // other file.
    let mut log = RunLog::open(&sync_config.local_folder, &sync_config.log_file_name)
        .context("Failed to open the log file")?;

    log.line(&format!("Sync run started: {}", Local::now().to_rfc2822()));
    sync::run_sync_flow(&sync_config, &mut log).await?;
    log.line(&format!("Sync run finished: {}", Local::now().to_rfc2822()));
    Ok(())
}
