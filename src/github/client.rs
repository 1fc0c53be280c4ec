//! GitHub API HTTP client.
//! Attaches representation and auth headers and turns non-2xx answers into
//! `AppError::Remote` with the status intact. No retries happen here.

use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{
    Client, ClientBuilder, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

const GITHUB_API_VERSION: &str = "2022-11-28";

pub const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
pub const ACCEPT_RAW: &str = "application/vnd.github.v3.raw";

// Shared transport so every client instance reuses one connection pool
static HTTP: Lazy<Client> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("portfolio-server"));
    headers.insert(
        "X-GitHub-Api-Version",
        HeaderValue::from_static(GITHUB_API_VERSION),
    );

    ClientBuilder::new()
        .default_headers(headers)
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

/// GitHub API client bound to a base URL and an optional bearer token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and decode the body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.get(url, ACCEPT_JSON).await?;
        Ok(response.json().await?)
    }

    /// GET `url` and return the body as text.
    pub async fn fetch_raw(&self, url: &str) -> Result<String> {
        let response = self.get(url, ACCEPT_RAW).await?;
        Ok(response.text().await?)
    }

    async fn get(&self, url: &str, accept: &'static str) -> Result<Response> {
        let mut request = HTTP.get(url).header(ACCEPT, accept);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        check_response(response)
    }
}

fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        log::debug!("GitHub answered {} for {}", status, response.url());
        Err(AppError::Remote {
            status: status.as_u16(),
        })
    }
}
