//! WebDAV One-Way Sync Tool
//!
//! Uploads files from a local folder that are absent from a remote WebDAV
//! folder. No deletion, no conflict resolution, no retries.

// davsync/src/lib.rs
pub mod config;
pub mod errors;
pub mod local;
pub mod logging;
pub mod sync;
pub mod webdav;
