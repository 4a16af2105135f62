// davsync/src/webdav/mod.rs
pub(crate) mod xml;

mod client;

pub use client::WebDavClient;
