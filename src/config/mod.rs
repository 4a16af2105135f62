// davsync/src/config/mod.rs
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;
use url::Url;

use crate::errors::{Result, SyncError};

pub const DEFAULT_LOG_FILE: &str = "sync_log.txt";
pub const DEFAULT_FILE_MASK: &str = "*";

/// Immutable configuration for one sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub webdav_url: String,
    pub remote_folder: String,
    pub username: String,
    pub password: String,
    pub local_folder: PathBuf,
    pub log_file_name: String,
    pub file_mask: String,
}

impl SyncConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let config = SyncConfig {
            webdav_url: get_string(matches, "webdav-url")?,
            remote_folder: get_string(matches, "remote-folder")?,
            username: get_string(matches, "username")?,
            password: get_string(matches, "password")?,
            local_folder: PathBuf::from(get_string(matches, "local-folder")?),
            log_file_name: get_string(matches, "log-file")?,
            file_mask: get_string(matches, "file-mask")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the value set before the run starts. Missing or empty
    /// parameters and an unparseable endpoint URL are reported here so the
    /// caller decides exit behavior; nothing in this module terminates the
    /// process.
    pub fn validate(&self) -> Result<()> {
        if self.webdav_url.is_empty() {
            return Err(SyncError::Config("webdav-url must not be empty".to_string()));
        }
        Url::parse(&self.webdav_url)?;
        if self.remote_folder.is_empty() {
            return Err(SyncError::Config("remote-folder must not be empty".to_string()));
        }
        if self.username.is_empty() {
            return Err(SyncError::Config("username must not be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(SyncError::Config("password must not be empty".to_string()));
        }
        if self.local_folder.as_os_str().is_empty() {
            return Err(SyncError::Config("local-folder must not be empty".to_string()));
        }
        if self.log_file_name.is_empty() {
            return Err(SyncError::Config("log-file must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Command-line definition. All flags except the log file name and the file
/// mask are mandatory; missing any of them is fatal at startup.
pub fn cli() -> Command {
    Command::new("davsync")
        .about("One-way synchronization of a local folder to a WebDAV server")
        .arg(
            Arg::new("webdav-url")
                .long("webdav-url")
                .value_name("URL")
                .help("Base URL of the WebDAV server")
                .required(true),
        )
        .arg(
            Arg::new("remote-folder")
                .long("remote-folder")
                .value_name("PATH")
                .help("Folder path on the server")
                .required(true),
        )
        .arg(
            Arg::new("username")
                .long("username")
                .value_name("NAME")
                .help("WebDAV user name")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .value_name("PASSWORD")
                .help("WebDAV password")
                .required(true),
        )
        .arg(
            Arg::new("local-folder")
                .long("local-folder")
                .value_name("DIR")
                .help("Local folder to synchronize")
                .required(true),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("NAME")
                .help("Log file name, created inside the local folder")
                .default_value(DEFAULT_LOG_FILE),
        )
        .arg(
            Arg::new("file-mask")
                .long("file-mask")
                .value_name("REGEX")
                .help("Regular expression applied to file base names (e.g. \\.txt$)")
                .default_value(DEFAULT_FILE_MASK),
        )
}

fn get_string(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| SyncError::Config(format!("{} must be provided", name)))
}
