//! Static file server for the built client bundle.
//!
//! Serves the build output the way the production reverse proxy does: the
//! bundle is reachable both at the site root and under the theme asset
//! prefix, and any unmatched path falls back to the root `index.html` so
//! client-side routes resolve.

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use tokio::sync::oneshot;
use tower_http::services::{ServeDir, ServeFile};

use crate::error::PrerenderError;

/// Asset prefix the production host serves the bundle under.
pub(crate) const THEME_DIST_PREFIX: &str = "/wp-content/themes/zentheme/dist";

/// Build the router serving a client bundle directory.
///
/// Also used by the preview server, which is the same layout minus the
/// browser driving.
#[must_use]
pub fn site_router(dist_dir: &Path) -> Router {
    let index = dist_dir.join("index.html");
    let spa = ServeDir::new(dist_dir).fallback(ServeFile::new(index));

    Router::new()
        .nest_service(THEME_DIST_PREFIX, ServeDir::new(dist_dir))
        .fallback_service(spa)
}

/// A running static server owned by the prerender run.
///
/// Runs on its own runtime so the otherwise synchronous driver can keep the
/// browser work on the calling thread. Shut down explicitly via
/// [`StaticServer::shutdown`]; dropping it tears the server down as well.
pub(crate) struct StaticServer {
    runtime: tokio::runtime::Runtime,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<Result<(), std::io::Error>>>,
}

impl StaticServer {
    /// Bind the address and start serving `dist_dir`.
    pub(crate) fn start(addr: SocketAddr, dist_dir: &Path) -> Result<Self, PrerenderError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        let app = site_router(dist_dir);

        // Bind synchronously so an occupied port fails the run up front
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind(addr))
            .map_err(|e| PrerenderError::Server(format!("failed to bind {addr}: {e}")))?;

        tracing::info!(address = %addr, dist_dir = %dist_dir.display(), "Static server started");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = runtime.spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(Self {
            runtime,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// Stop serving and wait for the server task to finish.
    pub(crate) fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = self.runtime.block_on(task);
            tracing::info!("Static server stopped");
        }
    }
}

impl Drop for StaticServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_builds_for_any_directory() {
        // Construction must not touch the filesystem; missing directories
        // surface as 404s at request time, not as panics here.
        let _router = site_router(Path::new("/nonexistent"));
    }
}
