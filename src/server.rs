use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::api::routes::create_router;
use crate::cache::RepoCache;
use crate::config::Config;
use crate::error::Result;
use crate::refresh;
use crate::AppState;

/// How many consecutive ports are tried when the configured one is taken.
pub const MAX_BIND_ATTEMPTS: u16 = 10;

/// Binds `addr`, moving on to the next port while the current one is in use.
pub async fn bind_with_fallback(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let mut addr = addr;
    let mut attempts = 1;

    loop {
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(e)
                if e.kind() == ErrorKind::AddrInUse
                    && attempts < MAX_BIND_ATTEMPTS
                    && addr.port() < u16::MAX =>
            {
                log::warn!("Port {} in use, trying {}...", addr.port(), addr.port() + 1);
                addr.set_port(addr.port() + 1);
                attempts += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Loads the cache eagerly, starts the daily refresh and serves HTTP until
/// the listener fails.
pub async fn serve(config: Config, cache: Arc<RepoCache>) -> Result<()> {
    log::info!("Loading repositories for {}", cache.account());
    if let Err(e) = cache.reload().await {
        log::error!("Initial load failed: {}", e);
    }

    refresh::spawn_daily(Arc::clone(&cache), config.refresh);

    let listener = bind_with_fallback(config.server_addr).await?;
    log::info!("Portfolio running at http://{}", listener.local_addr()?);

    let app = create_router(AppState {
        config: Arc::new(config),
        cache,
    });
    axum::serve(listener, app).await?;

    Ok(())
}
