// src/api_handler.rs

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking REST client shared by the Ensembl and NCBI fetchers.
pub struct ApiHandler {
    client: Client,
    base_url: String,
}

impl ApiHandler {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("guide_designer/0.1"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.request_with_retry(endpoint, "application/json", params)?;
        response.json().context("failed to decode JSON response")
    }

    pub fn get_plain_text(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String> {
        let response = self.request_with_retry(endpoint, "text/plain", params)?;
        response.text().context("failed to read response body")
    }

    fn request_with_retry(
        &self,
        endpoint: &str,
        accept: &str,
        params: &[(&str, &str)],
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut attempts = 0;

        loop {
            debug!("GET {}", url);
            let response = self
                .client
                .get(&url)
                .header("Accept", accept)
                .query(params)
                .send()
                .with_context(|| format!("request to {} failed", url))?;

            if response.status().is_success() {
                return Ok(response);
            }

            if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                attempts += 1;
                if attempts >= MAX_ATTEMPTS {
                    bail!("exceeded {} attempts for {}: rate limited", MAX_ATTEMPTS, url);
                }

                // Honor Retry-After when the server sends one.
                let wait_secs = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                warn!("rate limited by {}, retrying in {}s", url, wait_secs);
                thread::sleep(Duration::from_secs(wait_secs));
                continue;
            }

            let status = response.status();
            let body = response.text().unwrap_or_default();
            bail!("{} returned HTTP {}: {}", url, status, body);
        }
    }
}
