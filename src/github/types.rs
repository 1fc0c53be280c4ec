//! GitHub REST API payloads and the summaries projected from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository as returned by `GET /users/{account}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub private: bool,
}

impl Repository {
    /// Forks and private repositories are never listed.
    pub fn is_listed(&self) -> bool {
        !self.fork && !self.private
    }
}

/// Public projection of a repository served by `/api/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub updated_at: DateTime<Utc>,
}

impl From<Repository> for RepositorySummary {
    fn from(repo: Repository) -> Self {
        RepositorySummary {
            id: repo.id,
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            html_url: repo.html_url,
            language: repo.language,
            stargazers_count: repo.stargazers_count,
            updated_at: repo.updated_at,
        }
    }
}

/// Keeps listed repositories in upstream order and projects them.
pub fn summarize(repos: Vec<Repository>) -> Vec<RepositorySummary> {
    repos
        .into_iter()
        .filter(Repository::is_listed)
        .map(RepositorySummary::from)
        .collect()
}
