//! Refresh triggers: the daily timer and the fire-and-forget reload used by
//! the webhook. Both only log reload failures; nobody awaits their outcome.

use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::task::JoinHandle;

use crate::cache::RepoCache;
use crate::config::RefreshSchedule;

pub const GITHUB_EVENT_HEADER: &str = "x-github-event";

/// First instant strictly after `now` at which the schedule fires.
pub fn next_run_after(now: DateTime<Utc>, schedule: &RefreshSchedule) -> DateTime<Utc> {
    let local = now.with_timezone(&schedule.offset).naive_local();
    let mut next = local.date().and_time(schedule.at);
    if next <= local {
        next += Duration::days(1);
    }

    let utc = next - Duration::seconds(schedule.offset.local_minus_utc().into());
    Utc.from_utc_datetime(&utc)
}

/// True when the webhook delivery announces a push.
pub fn is_push_event(headers: &HeaderMap) -> bool {
    headers
        .get(GITHUB_EVENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|event| event == "push")
}

/// Reloads the cache and logs the outcome instead of returning it.
pub async fn reload_logged(cache: &RepoCache, trigger: &str) {
    match cache.reload().await {
        Ok(repos) => log::info!("{} refresh loaded {} repositories", trigger, repos.len()),
        Err(e) => log::error!("{} refresh failed: {}", trigger, e),
    }
}

/// Starts a detached reload.
pub fn spawn_reload(cache: Arc<RepoCache>, trigger: &'static str) -> JoinHandle<()> {
    tokio::spawn(async move { reload_logged(&cache, trigger).await })
}

/// Starts the daily refresh loop.
pub fn spawn_daily(cache: Arc<RepoCache>, schedule: RefreshSchedule) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let next = next_run_after(now, &schedule);
            log::info!(
                "Next scheduled refresh at {}",
                next.with_timezone(&schedule.offset)
            );

            tokio::time::sleep((next - now).to_std().unwrap_or_default()).await;
            reload_logged(&cache, "Scheduled").await;
        }
    })
}
