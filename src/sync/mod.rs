// davsync/src/sync/mod.rs
pub(crate) mod logic;

use anyhow::Result;

use crate::config::SyncConfig;
use crate::logging::RunLog;

/// Public entry point for the sync process.
/// Lists the remote folder, enumerates local candidates and uploads every
/// file that is absent remotely, reporting outcomes through the run log.
pub async fn run_sync_flow(config: &SyncConfig, log: &mut RunLog) -> Result<()> {
    logic::perform_sync(config, log).await
}
