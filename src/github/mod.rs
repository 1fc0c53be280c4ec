//! GitHub API module.
//! The cache depends on the `GitHubApi` trait; `GitHubClient` is the real
//! implementation backed by the REST API.

pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use client::GitHubClient;
pub use types::{Repository, RepositorySummary};

/// Upstream operations the repository cache needs.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Owned repositories of `account`, most recently updated first, at most 100.
    async fn list_repositories(&self, account: &str) -> Result<Vec<Repository>>;

    /// Raw Markdown of the README of `full_name` (`owner/repo`).
    async fn readme(&self, full_name: &str) -> Result<String>;
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn list_repositories(&self, account: &str) -> Result<Vec<Repository>> {
        let url = format!(
            "{}/users/{}/repos?sort=updated&per_page=100&type=owner",
            self.base_url(),
            account
        );
        self.fetch_json(&url).await
    }

    async fn readme(&self, full_name: &str) -> Result<String> {
        let url = format!("{}/repos/{}/readme", self.base_url(), full_name);
        self.fetch_raw(&url).await
    }
}
