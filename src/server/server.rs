//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::handlers::{health_check, index};
use crate::server::middleware::RecoveryMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::{AppError, Result};
use actix_web::{App, HttpServer as ActixHttpServer, web};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

/// Build the application for `state`
///
/// Middleware order, outermost first: panic recovery, access log, path
/// scoped admission control. Route level gates sit below these.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let path_admission = state.path_admission();
    let routes_state = state.clone();

    App::new()
        .app_data(state)
        .configure(routes::configure_extractors)
        .wrap(path_admission)
        .wrap(TracingLogger::default())
        .wrap(RecoveryMiddleware)
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .configure(|cfg| routes::user::configure_routes(cfg, &routes_state))
        .configure(|cfg| routes::context_elements::configure_routes(cfg, &routes_state))
}

/// HTTP server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Open storage and wire the application state
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = StorageLayer::new(&config.database).await?;
        let state = AppState::new(config.clone(), storage);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    pub fn from_state(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serve until actix receives SIGINT or SIGTERM
    ///
    /// Sweepers run for the lifetime of the server and storage is closed on
    /// the way out.
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let shutdown = CancellationToken::new();
        let sweepers = self.state.start_sweepers(&shutdown);

        let state = web::Data::new(self.state.clone());
        let mut server = ActixHttpServer::new(move || create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let result = match server.bind(&bind_addr) {
            Ok(server) => {
                info!("HTTP server listening on {}", bind_addr);
                server
                    .run()
                    .await
                    .map_err(|e| AppError::internal(format!("Server error: {}", e)))
            }
            Err(e) => Err(AppError::config(format!(
                "Failed to bind {}: {}",
                bind_addr, e
            ))),
        };

        shutdown.cancel();
        for sweeper in sweepers {
            if let Err(e) = sweeper.await {
                error!("Rate limit sweeper failed: {}", e);
            }
        }

        if let Err(e) = self.state.storage.close().await {
            error!("Failed to close storage: {}", e);
        }

        info!("HTTP server stopped");
        result
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
