// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::ProfileConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &ProfileConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page and return its body.
///
/// Transport failures, timeouts and non-2xx statuses are all fetch errors.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::fetch(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::fetch(url, format!("HTTP {status}")));
    }

    response.text().await.map_err(|e| AppError::fetch(url, e))
}
