mod common;

use std::sync::Arc;

use common::{FakeGitHub, repo, test_config};
use portfolio_server::cache::RepoCache;
use portfolio_server::error::AppError;
use portfolio_server::export;
use serde_json::Value;

#[tokio::test]
async fn writes_repos_and_config_json() {
    let out = tempfile::tempdir().unwrap();
    let config = test_config(out.path());
    let fake = Arc::new(FakeGitHub::with_repos(vec![
        repo(1, "site", false),
        repo(2, "fork", true),
    ]));
    let cache = RepoCache::new(fake, config.account_name.clone());

    let count = export::run(&cache, &config.contact, out.path()).await.unwrap();
    assert_eq!(count, 1);

    let repos: Value =
        serde_json::from_slice(&std::fs::read(out.path().join(export::REPOS_FILE)).unwrap()).unwrap();
    assert_eq!(repos["repos"].as_array().unwrap().len(), 1);
    assert_eq!(repos["repos"][0]["name"], "site");

    let contact: Value =
        serde_json::from_slice(&std::fs::read(out.path().join(export::CONFIG_FILE)).unwrap()).unwrap();
    assert_eq!(contact["email"], "someone@example.com");
    assert_eq!(contact["github"], "https://github.com/someone");
}

#[tokio::test]
async fn requires_existing_output_directory() {
    let parent = tempfile::tempdir().unwrap();
    let missing = parent.path().join("dist");
    let config = test_config(parent.path());
    let fake = Arc::new(FakeGitHub::with_repos(vec![repo(1, "site", false)]));
    let cache = RepoCache::new(fake.clone(), config.account_name.clone());

    let err = export::run(&cache, &config.contact, &missing).await.unwrap_err();

    assert!(matches!(err, AppError::MissingOutputDir(_)));
    assert_eq!(fake.list_calls(), 0);
}

#[tokio::test]
async fn upstream_failure_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    let config = test_config(out.path());
    let cache = RepoCache::new(Arc::new(FakeGitHub::failing_with(401)), config.account_name.clone());

    let err = export::run(&cache, &config.contact, out.path()).await.unwrap_err();

    assert!(matches!(err, AppError::Remote { status: 401 }));
    assert!(!out.path().join(export::REPOS_FILE).exists());
}
