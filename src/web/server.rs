//! Web server for Filedrop.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::file::FileStore;
use crate::Result;

use super::handlers::AppState;
use super::router::{
    create_health_router, create_openapi_router, create_router, create_static_router,
};

/// Web server for the API and front end.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Directory served under `/static`.
    static_dir: PathBuf,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// Opens (and if needed creates) the upload and static directories.
    pub async fn new(config: &Config) -> Result<Self> {
        let addr = config.listen_addr()?;

        let store = FileStore::open(&config.storage.upload_dir).await?;
        tracing::info!("Upload directory: {}", store.root().display());

        let static_dir = PathBuf::from(&config.storage.static_dir);
        tokio::fs::create_dir_all(&static_dir).await?;
        tracing::info!("Static directory: {}", static_dir.display());

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(store)),
            static_dir,
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn router(&self) -> Router {
        create_router(self.app_state.clone())
            .merge(create_static_router(&self.static_dir))
            .merge(create_health_router())
            .merge(create_openapi_router())
    }

    /// Run the web server until Ctrl-C.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
