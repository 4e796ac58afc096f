//! Source-image download for job workspaces.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;

/// Timeout for a single source-image download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Download errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Download failed with status {status}: {url}")]
    Status { status: u16, url: String },
}

/// Builds the HTTP client used for source-image downloads.
pub fn build_client() -> Result<Client, FetchError> {
    Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(Into::into)
}

/// Downloads `url` into `out_path`.
pub async fn download_file(client: &Client, url: &str, out_path: &Path) -> Result<(), FetchError> {
    let resp = client.get(url).send().await?;

    if !resp.status().is_success() {
        return Err(FetchError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let bytes = resp.bytes().await?;
    std::fs::write(out_path, &bytes)?;
    Ok(())
}
