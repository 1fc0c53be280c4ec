pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod github;
pub mod markdown;
pub mod refresh;
pub mod server;

use std::sync::Arc;
use cache::RepoCache;
use config::Config;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<RepoCache>,
}
