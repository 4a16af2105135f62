// davsync/src/sync/logic.rs
use anyhow::{Context, Result};

use crate::config::SyncConfig;
use crate::local;
use crate::logging::RunLog;
use crate::webdav::WebDavClient;

/// Orchestrates one sync run.
///
/// 1. Lists the base names present in the remote WebDAV folder.
/// 2. Enumerates local files whose base name matches the mask.
/// 3. Uploads each candidate whose base name is absent remotely.
///
/// Listing and enumeration failures abort the run before any upload; an
/// upload failure is reduced to a log line and the remaining candidates are
/// still attempted. Names are compared case-sensitively, by base name only.
pub async fn perform_sync(config: &SyncConfig, log: &mut RunLog) -> Result<()> {
    let client = WebDavClient::new(config).context("Failed to build the WebDAV client")?;

    let remote_files = client
        .list_remote_files(log)
        .await
        .context("Failed to list files on the WebDAV server")?;

    let local_files = local::enumerate_files(&config.local_folder, &config.file_mask)
        .context("Failed to enumerate files in the local folder")?;

    for local_file in &local_files {
        // Base names the filesystem cannot represent as UTF-8 never matched
        // the mask in the first place; skip defensively.
        let Some(file_name) = local_file.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if remote_files.contains(file_name) {
            continue;
        }

        log.line(&format!(
            "File {} is missing on the server. Uploading...",
            file_name
        ));
        match client.upload_file(local_file, file_name).await {
            Ok(()) => log.line(&format!("File {} uploaded successfully.", file_name)),
            Err(e) => log.line(&format!("Failed to upload file {}: {}", file_name, e)),
        }
    }

    Ok(())
}
