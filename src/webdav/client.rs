// davsync/src/webdav/client.rs
use reqwest::{Client, Method, StatusCode};
use std::collections::HashSet;
use std::path::Path;
use tokio_util::io::ReaderStream;

use super::xml;
use crate::config::SyncConfig;
use crate::errors::{Result, SyncError};
use crate::logging::RunLog;

/// Client for the two WebDAV operations this tool needs: a shallow folder
/// listing and a single-file upload. Both authenticate with basic auth.
pub struct WebDavClient {
    client: Client,
    webdav_url: String,
    remote_folder: String,
    username: String,
    password: String,
}

impl WebDavClient {
    pub fn new(config: &SyncConfig) -> Result<Self> {
        // No timeout is configured; a hung connection blocks the run.
        let client = Client::builder().build()?;

        Ok(WebDavClient {
            client,
            webdav_url: config.webdav_url.clone(),
            remote_folder: config.remote_folder.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn folder_url(&self) -> String {
        format!("{}{}", self.webdav_url, self.remote_folder)
    }

    /// Returns the base names present at the remote folder level.
    ///
    /// Issues a PROPFIND with `Depth: 1` (immediate children only) and
    /// reduces every href in the multistatus response to its percent-decoded
    /// final path segment. Hrefs that fail to decode are logged and skipped;
    /// a transport failure or an undecodable body aborts the listing.
    pub async fn list_remote_files(&self, log: &mut RunLog) -> Result<HashSet<String>> {
        let propfind = Method::from_bytes(b"PROPFIND").expect("PROPFIND is a valid method token");

        let response = self
            .client
            .request(propfind, self.folder_url())
            .basic_auth(&self.username, Some(&self.password))
            .header("Depth", "1")
            .header("Content-Type", "text/xml")
            .send()
            .await?;
        let body = response.text().await?;

        let mut files = HashSet::new();
        for href in xml::parse_multistatus_hrefs(&body)? {
            let decoded = match urlencoding::decode(&href) {
                Ok(decoded) => decoded.into_owned(),
                Err(e) => {
                    log.line(&format!("Failed to decode href {}: {}", href, e));
                    continue;
                }
            };
            files.insert(base_name(&decoded).to_string());
        }
        Ok(files)
    }

    /// Streams one local file to the remote folder under the given name.
    ///
    /// The target path carries the percent-encoded file name; the body is
    /// the raw file bytes, streamed rather than buffered. Only 201 Created
    /// and 204 No Content count as success; every other status, a transport
    /// failure, or an unreadable local file yields an upload error carrying
    /// the file name.
    pub async fn upload_file(&self, local_path: &Path, file_name: &str) -> Result<()> {
        let target_url = format!("{}{}", self.folder_url(), urlencoding::encode(file_name));

        let file = tokio::fs::File::open(local_path)
            .await
            .map_err(|e| SyncError::Upload {
                file: file_name.to_string(),
                reason: format!("cannot open {}: {}", local_path.display(), e),
            })?;
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));

        let response = self
            .client
            .put(&target_url)
            .basic_auth(&self.username, Some(&self.password))
            .body(body)
            .send()
            .await
            .map_err(|e| SyncError::Upload {
                file: file_name.to_string(),
                reason: format!("request failed: {}", e),
            })?;

        match response.status() {
            StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(()),
            status => Err(SyncError::Upload {
                file: file_name.to_string(),
                reason: format!("server returned status {}", status),
            }),
        }
    }
}

/// Final path segment with trailing slashes stripped, so a collection href
/// like `/remote/docs/` maps to `docs`. An all-slash path maps to `/`.
fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server_uri: &str) -> SyncConfig {
        SyncConfig {
            webdav_url: server_uri.to_string(),
            remote_folder: "/remote/".to_string(),
            username: "sync".to_string(),
            password: "secret".to_string(),
            local_folder: PathBuf::from("."),
            log_file_name: "sync_log.txt".to_string(),
            file_mask: ".*".to_string(),
        }
    }

    fn open_log(dir: &tempfile::TempDir) -> RunLog {
        RunLog::open(dir.path(), "sync_log.txt").unwrap()
    }

    #[test]
    fn test_base_name_strips_directory_components() {
        assert_eq!(base_name("/remote/report.pdf"), "report.pdf");
        assert_eq!(base_name("report.pdf"), "report.pdf");
    }

    #[test]
    fn test_base_name_of_collection_href() {
        assert_eq!(base_name("/remote/docs/"), "docs");
        assert_eq!(base_name("/"), "/");
    }

    #[tokio::test]
    async fn test_listing_returns_decoded_base_names() {
        let server = MockServer::start().await;
        let listing = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:">
            <d:response><d:href>/remote/</d:href></d:response>
            <d:response><d:href>/remote/a.txt</d:href></d:response>
            <d:response><d:href>/remote/File%20with%20spaces.txt</d:href></d:response>
        </d:multistatus>"#;

        Mock::given(method("PROPFIND"))
            .and(path("/remote/"))
            .and(header("Depth", "1"))
            .and(header("Content-Type", "text/xml"))
            .respond_with(ResponseTemplate::new(207).set_body_string(listing))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut log = open_log(&dir);
        let client = WebDavClient::new(&test_config(&server.uri())).unwrap();
        let files = client.list_remote_files(&mut log).await.unwrap();

        assert!(files.contains("a.txt"));
        assert!(files.contains("File with spaces.txt"));
        // The folder's own entry reduces to the folder name.
        assert!(files.contains("remote"));
        assert_eq!(files.len(), 3);
    }

    #[tokio::test]
    async fn test_undecodable_href_is_logged_and_skipped() {
        let server = MockServer::start().await;
        // %FF is not valid UTF-8 once decoded; the entry must be dropped
        // without aborting the listing.
        let listing = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:">
            <d:response><d:href>/remote/%FF.txt</d:href></d:response>
            <d:response><d:href>/remote/ok.txt</d:href></d:response>
        </d:multistatus>"#;

        Mock::given(method("PROPFIND"))
            .and(path("/remote/"))
            .respond_with(ResponseTemplate::new(207).set_body_string(listing))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut log = open_log(&dir);
        let client = WebDavClient::new(&test_config(&server.uri())).unwrap();
        let files = client.list_remote_files(&mut log).await.unwrap();
        drop(log);

        assert!(files.contains("ok.txt"));
        assert_eq!(files.len(), 1);

        let log_content =
            std::fs::read_to_string(dir.path().join("sync_log.txt")).unwrap();
        assert!(log_content.contains("Failed to decode href /remote/%FF.txt"));
    }

    #[tokio::test]
    async fn test_listing_with_non_xml_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("PROPFIND"))
            .and(path("/remote/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut log = open_log(&dir);
        let client = WebDavClient::new(&test_config(&server.uri())).unwrap();
        let result = client.list_remote_files(&mut log).await;

        assert!(matches!(result, Err(SyncError::Parse(_))));
    }

    #[tokio::test]
    async fn test_upload_succeeds_on_created() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/remote/b.txt"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let local_path = dir.path().join("b.txt");
        std::fs::write(&local_path, b"payload").unwrap();

        let client = WebDavClient::new(&test_config(&server.uri())).unwrap();
        client.upload_file(&local_path, "b.txt").await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_succeeds_on_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/remote/b.txt"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let local_path = dir.path().join("b.txt");
        std::fs::write(&local_path, b"payload").unwrap();

        let client = WebDavClient::new(&test_config(&server.uri())).unwrap();
        client.upload_file(&local_path, "b.txt").await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_encodes_the_target_file_name() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/remote/File%20with%20spaces.txt"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let local_path = dir.path().join("File with spaces.txt");
        std::fs::write(&local_path, b"payload").unwrap();

        let client = WebDavClient::new(&test_config(&server.uri())).unwrap();
        client
            .upload_file(&local_path, "File with spaces.txt")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_error_status_carries_the_file_name() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/remote/b.txt"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let local_path = dir.path().join("b.txt");
        std::fs::write(&local_path, b"payload").unwrap();

        let client = WebDavClient::new(&test_config(&server.uri())).unwrap();
        match client.upload_file(&local_path, "b.txt").await {
            Err(SyncError::Upload { file, reason }) => {
                assert_eq!(file, "b.txt");
                assert!(reason.contains("500"));
            }
            other => panic!("expected Upload error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_of_missing_local_file_is_upload_error() {
        let server = MockServer::start().await;
        let client = WebDavClient::new(&test_config(&server.uri())).unwrap();
        let result = client
            .upload_file(Path::new("/nonexistent/b.txt"), "b.txt")
            .await;
        assert!(matches!(result, Err(SyncError::Upload { .. })));
    }
}
