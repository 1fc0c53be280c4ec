//! In-memory repository cache.
//!
//! Holds the last successfully loaded repository list and a README render
//! per repository. The list is loaded on first use and replaced wholesale by
//! [`RepoCache::reload`]; every reload also empties the README mapping.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::error::Result;
use crate::github::{GitHubApi, RepositorySummary, types::summarize};
use crate::markdown;

/// Raw README Markdown together with its HTML rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadmeRender {
    pub raw: String,
    pub html: String,
}

#[derive(Default)]
struct CacheState {
    repos: Option<Vec<RepositorySummary>>,
    readmes: HashMap<String, ReadmeRender>,
    // Bumped on every reload so README fetches that straddle one are dropped
    generation: u64,
}

pub struct RepoCache {
    api: Arc<dyn GitHubApi>,
    account: String,
    state: RwLock<CacheState>,
    reload_lock: Mutex<()>,
}

impl RepoCache {
    pub fn new(api: Arc<dyn GitHubApi>, account: impl Into<String>) -> Self {
        Self {
            api,
            account: account.into(),
            state: RwLock::new(CacheState::default()),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Cached list, or a fresh one when nothing has loaded yet.
    ///
    /// Cold-cache callers queue on the reload lock and re-check once they get
    /// it, so overlapping callers share a single upstream listing.
    pub async fn get_repos(&self) -> Result<Vec<RepositorySummary>> {
        if let Some(repos) = self.cached_repos().await {
            return Ok(repos);
        }

        let _guard = self.reload_lock.lock().await;
        if let Some(repos) = self.cached_repos().await {
            return Ok(repos);
        }
        self.reload_locked().await
    }

    /// Unconditionally lists the account's repositories, replaces the cached
    /// list and clears every cached README.
    pub async fn reload(&self) -> Result<Vec<RepositorySummary>> {
        let _guard = self.reload_lock.lock().await;
        self.reload_locked().await
    }

    async fn reload_locked(&self) -> Result<Vec<RepositorySummary>> {
        let listing = self.api.list_repositories(&self.account).await?;
        let fetched = listing.len();
        let repos = summarize(listing);

        let mut state = self.state.write().await;
        state.repos = Some(repos.clone());
        state.readmes.clear();
        state.generation += 1;
        drop(state);

        log::info!(
            "Loaded {} repositories for {} ({} skipped as fork or private)",
            repos.len(),
            self.account,
            fetched - repos.len()
        );
        Ok(repos)
    }

    async fn cached_repos(&self) -> Option<Vec<RepositorySummary>> {
        self.state.read().await.repos.clone()
    }

    /// README render for `full_name` (`owner/repo`).
    ///
    /// `Ok(None)` means there is no README to show: any upstream failure,
    /// including a 404, counts as absent. `Err` is reserved for the render
    /// task itself failing.
    pub async fn get_readme(&self, full_name: &str) -> Result<Option<ReadmeRender>> {
        let generation = {
            let state = self.state.read().await;
            if let Some(render) = state.readmes.get(full_name) {
                log::debug!("README cache hit for {}", full_name);
                return Ok(Some(render.clone()));
            }
            state.generation
        };

        let raw = match self.api.readme(full_name).await {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!("No README for {}: {}", full_name, e);
                return Ok(None);
            }
        };

        let render = tokio::task::spawn_blocking(move || {
            let html = markdown::render(&raw);
            ReadmeRender { raw, html }
        })
        .await?;

        let mut state = self.state.write().await;
        if state.generation != generation {
            return Ok(Some(render));
        }
        let stored = state
            .readmes
            .entry(full_name.to_string())
            .or_insert(render)
            .clone();
        Ok(Some(stored))
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.repos.is_some()
    }

    pub async fn readme_count(&self) -> usize {
        self.state.read().await.readmes.len()
    }
}
