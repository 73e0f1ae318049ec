use crate::utils::error::{Result, ScraperError};
use reqwest::Client;
use std::time::Duration;

pub fn build_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(ScraperError::Request)
}

/// Single GET with no retry. Non-2xx responses are request errors.
pub async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> Result<String> {
    tracing::debug!("Sending request to: {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify(e, url, timeout))?;

    let status = response.status();
    tracing::debug!("Response status: {}", status);

    if !status.is_success() {
        return Err(ScraperError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| classify(e, url, timeout))
}

fn classify(err: reqwest::Error, url: &str, timeout: Duration) -> ScraperError {
    if err.is_timeout() {
        ScraperError::Timeout {
            url: url.to_string(),
            timeout_secs: timeout.as_secs(),
        }
    } else if err.is_connect() {
        ScraperError::Connection {
            url: url.to_string(),
            source: err,
        }
    } else {
        ScraperError::Request(err)
    }
}
