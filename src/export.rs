//! One-shot export of the repository list and contact links as static JSON,
//! for hosting the site without the server.

use std::path::Path;

use serde::Serialize;

use crate::api::models::ReposResponse;
use crate::cache::RepoCache;
use crate::config::ContactLinks;
use crate::error::{AppError, Result};

pub const REPOS_FILE: &str = "repos.json";
pub const CONFIG_FILE: &str = "config.json";

/// Writes `repos.json` and `config.json` into `out_dir`, which must exist.
pub async fn run(cache: &RepoCache, contact: &ContactLinks, out_dir: &Path) -> Result<usize> {
    if !tokio::fs::metadata(out_dir).await.is_ok_and(|meta| meta.is_dir()) {
        return Err(AppError::MissingOutputDir(out_dir.to_path_buf()));
    }

    let repos = cache.reload().await?;
    let count = repos.len();

    write_json(&out_dir.join(REPOS_FILE), &ReposResponse { repos }).await?;
    write_json(&out_dir.join(CONFIG_FILE), contact).await?;

    log::info!(
        "Wrote {} and {} to {}",
        REPOS_FILE,
        CONFIG_FILE,
        out_dir.display()
    );
    Ok(count)
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_vec(value)?;
    tokio::fs::write(path, body).await?;
    Ok(())
}
