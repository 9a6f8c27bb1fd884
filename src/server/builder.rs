//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{AppError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Debug, Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self { config: None }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| AppError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

/// Build the server from a validated `config` and serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting CESE backend {}", env!("CARGO_PKG_VERSION"));

    let server = ServerBuilder::new().with_config(config).build().await?;
    let address = server.config().address();

    info!("Server starting at: http://{}", address);
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /api/v1/user/register | login | refresh");
    info!("   PUT  /api/v1/user/password, GET /api/v1/user/profile");
    info!("   /api/v1/context-elements[/{{id}}] - Context element CRUD");

    server.start().await
}
