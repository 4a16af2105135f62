use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("WebDAV request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Listing parse error: {0}")]
    Parse(String),

    #[error("File mask error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    // Caught at the driver level; never aborts the run.
    #[error("Upload of {file} failed: {reason}")]
    Upload { file: String, reason: String },
}

pub type Result<T> = std::result::Result<T, SyncError>;
