//! Shared helpers for integration tests: a counting in-memory `GitHubApi`
//! and constructors for app state wired to it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use portfolio_server::{
    AppState,
    cache::RepoCache,
    config::Config,
    error::{AppError, Result},
    github::{GitHubApi, Repository},
};

pub const ACCOUNT: &str = "someone";

/// In-memory GitHub double that counts upstream calls.
#[derive(Default)]
pub struct FakeGitHub {
    pub listing: Mutex<Vec<Repository>>,
    pub list_status: Mutex<Option<u16>>,
    pub readmes: Mutex<HashMap<String, String>>,
    pub list_calls: AtomicUsize,
    pub readme_calls: AtomicUsize,
}

impl FakeGitHub {
    pub fn with_repos(repos: Vec<Repository>) -> Self {
        let fake = Self::default();
        *fake.listing.lock().unwrap() = repos;
        fake
    }

    pub fn failing_with(status: u16) -> Self {
        let fake = Self::default();
        *fake.list_status.lock().unwrap() = Some(status);
        fake
    }

    pub fn add_readme(&self, full_name: &str, markdown: &str) {
        self.readmes
            .lock()
            .unwrap()
            .insert(full_name.to_string(), markdown.to_string());
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn readme_calls(&self) -> usize {
        self.readme_calls.load(Ordering::SeqCst)
    }

    /// Polls until `list_calls` reaches `expected` or a second passes.
    pub async fn wait_for_list_calls(&self, expected: usize) -> usize {
        for _ in 0..100 {
            if self.list_calls() >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.list_calls()
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn list_repositories(&self, _account: &str) -> Result<Vec<Repository>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = *self.list_status.lock().unwrap() {
            return Err(AppError::Remote { status });
        }
        Ok(self.listing.lock().unwrap().clone())
    }

    async fn readme(&self, full_name: &str) -> Result<String> {
        self.readme_calls.fetch_add(1, Ordering::SeqCst);
        self.readmes
            .lock()
            .unwrap()
            .get(full_name)
            .cloned()
            .ok_or(AppError::Remote { status: 404 })
    }
}

pub fn repo(id: u64, name: &str, fork: bool) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        full_name: format!("{}/{}", ACCOUNT, name),
        description: Some(format!("{} description", name)),
        html_url: format!("https://github.com/{}/{}", ACCOUNT, name),
        language: Some("Rust".to_string()),
        stargazers_count: 3,
        updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        fork,
        private: false,
    }
}

pub fn test_config(static_dir: &Path) -> Config {
    let static_dir = static_dir.to_string_lossy().to_string();
    Config::from_lookup(|key| match key {
        "GITHUB_USERNAME" => Some(ACCOUNT.to_string()),
        "GITHUB_URL" => Some("https://github.com/someone".to_string()),
        "LINKEDIN_URL" => Some("https://linkedin.com/in/someone".to_string()),
        "INSTAGRAM_URL" => Some("https://instagram.com/someone".to_string()),
        "EMAIL" => Some("someone@example.com".to_string()),
        "STATIC_DIR" => Some(static_dir.clone()),
        _ => None,
    })
    .unwrap()
}

pub fn app_state(fake: Arc<FakeGitHub>, static_dir: &Path) -> AppState {
    let config = test_config(static_dir);
    let cache = RepoCache::new(fake, config.account_name.clone());
    AppState {
        config: Arc::new(config),
        cache: Arc::new(cache),
    }
}
