use serde::Serialize;

use crate::github::RepositorySummary;

#[derive(Serialize)]
pub struct ReposResponse {
    pub repos: Vec<RepositorySummary>,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct NotFoundResponse {
    pub error: String,
    pub path: String,
}
