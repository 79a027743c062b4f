use std::sync::Arc;

use tokio::net::TcpListener;

use tessera_sdk::Tessera;

use crate::auth::{AuthProvider, TrustedHeaderAuth};
use crate::config::TesseraConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Tessera HTTP server.
pub struct TesseraServer {
    config: TesseraConfig,
    state: AppState,
}

impl TesseraServer {
    /// Open the store named by `config` and authenticate with the trusted
    /// user header.
    pub fn open(config: TesseraConfig) -> ServerResult<Self> {
        let tessera = Tessera::open_with(
            &config.storage_root,
            Arc::new(config.registry()),
            config.version_store_config(),
        )?;
        Ok(Self::new(config, tessera, Arc::new(TrustedHeaderAuth)))
    }

    pub fn new(config: TesseraConfig, tessera: Tessera, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            config,
            state: AppState { tessera, auth },
        }
    }

    pub fn config(&self) -> &TesseraConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("tessera server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
