use axum::{
    routing::{get, post},
    Router,
    extract::{Json, OriginalUri, Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::{ServeDir, ServeFile};

use crate::api::models::{RefreshResponse, ReposResponse};
use crate::api::response;
use crate::config::ContactLinks;
use crate::error::Result;
use crate::refresh::{is_push_event, spawn_reload};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    let static_dir = app_state.config.static_dir.clone();
    // Unknown non-API paths get the single-page app's index.html
    let site = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_router())
        .fallback_service(site)
        .layer(middleware::from_fn(reserve_api_prefix))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/config", get(config_handler))
        .route("/repos", get(repos_handler))
        .route("/repos/", get(repos_handler))
        .route("/repos/:owner/:repo/readme", get(readme_handler))
        .route("/refresh", post(refresh_handler))
        .route("/webhook/github", post(webhook_handler))
        .fallback(api_not_found)
}

async fn config_handler(State(state): State<AppState>) -> Json<ContactLinks> {
    Json(state.config.contact.clone())
}

async fn repos_handler(State(state): State<AppState>) -> Result<Json<ReposResponse>> {
    let repos = state.cache.get_repos().await.inspect_err(|e| {
        log::error!("GitHub API error: {}", e);
    })?;
    log::debug!("Serving {} repositories", repos.len());
    Ok(Json(ReposResponse { repos }))
}

async fn readme_handler(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    let full_name = format!("{}/{}", owner, repo);

    match state.cache.get_readme(&full_name).await {
        Ok(Some(readme)) => Json(readme).into_response(),
        Ok(None) => response::error(StatusCode::NOT_FOUND, "README not found"),
        Err(e) => {
            log::error!("README for {} failed: {}", full_name, e);
            response::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch readme")
        }
    }
}

async fn refresh_handler(State(state): State<AppState>) -> Response {
    match state.cache.reload().await {
        Ok(repos) => {
            log::info!("Manual refresh loaded {} repositories", repos.len());
            Json(RefreshResponse { ok: true }).into_response()
        }
        Err(e) => {
            log::error!("Manual refresh failed: {}", e);
            response::error(StatusCode::INTERNAL_SERVER_ERROR, "Refresh failed")
        }
    }
}

// GitHub expects a fast 200 whatever happens to the reload.
async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, &'static str) {
    if is_push_event(&headers) {
        log::info!("Push webhook received, refreshing repositories");
        spawn_reload(state.cache.clone(), "Webhook");
    }
    (StatusCode::OK, "OK")
}

// `/api` and lookalikes such as `/apix` never reach the static site.
async fn reserve_api_prefix(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if path.starts_with("/api") && !path.starts_with("/api/") {
        log::debug!("Unknown API path {}", path);
        return response::route_not_found(path);
    }
    next.run(request).await
}

async fn api_not_found(OriginalUri(uri): OriginalUri) -> Response {
    log::debug!("Unknown API path {}", uri.path());
    response::route_not_found(uri.path())
}
