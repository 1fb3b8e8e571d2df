//! Release-notes download

use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::error::Result;

const FETCH_TIMEOUT_SECS: u64 = 30;

/// GET the raw markdown document. Non-2xx responses are errors.
pub async fn fetch_document(url: &str) -> Result<String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()?;

    info!(url, "fetching release notes");
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    info!(bytes = body.len(), "fetched release notes");
    Ok(body)
}
