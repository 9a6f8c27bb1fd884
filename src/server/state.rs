//! Application state shared across HTTP handlers

use crate::auth::SessionTokenService;
use crate::config::Config;
use crate::core::rate_limiter::{RateLimitPolicyResolver, SWEEP_INTERVAL, TokenBucketStore};
use crate::server::middleware::{AdmissionMiddleware, AuthMiddleware};
use crate::services::{ContextElementService, UserService};
use crate::storage::StorageLayer;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// One bucket store per admission scope, plus the path policy resolver
#[derive(Debug, Clone)]
pub struct RateLimiters {
    pub resolver: Arc<RateLimitPolicyResolver>,
    pub path: Arc<TokenBucketStore>,
    pub ip: Arc<TokenBucketStore>,
    pub user: Arc<TokenBucketStore>,
}

impl RateLimiters {
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: Arc::new(RateLimitPolicyResolver::new(&config.rate_limit)),
            path: Arc::new(TokenBucketStore::new()),
            ip: Arc::new(TokenBucketStore::new()),
            user: Arc::new(TokenBucketStore::new()),
        }
    }

    /// Start one sweeper per store, all stopped by `shutdown`
    pub fn spawn_sweepers(&self, every: Duration, shutdown: &CancellationToken) -> Vec<JoinHandle<()>> {
        [&self.path, &self.ip, &self.user]
            .into_iter()
            .map(|store| store.spawn_sweeper(every, shutdown.clone()))
            .collect()
    }
}

/// HTTP server state shared across handlers
///
/// Every field is behind an `Arc`, so cloning per worker is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    pub storage: Arc<StorageLayer>,
    pub tokens: Arc<SessionTokenService>,
    pub users: Arc<UserService>,
    pub elements: Arc<ContextElementService>,
    pub limiters: RateLimiters,
}

impl AppState {
    /// Wire services and limiter stores on top of an opened storage layer
    pub fn new(config: Config, storage: StorageLayer) -> Self {
        let tokens = Arc::new(SessionTokenService::new(&config.jwt.secret));
        let users = UserService::new(
            storage.users.clone(),
            tokens.clone(),
            config.jwt.clone(),
            config.password.clone(),
        );
        let elements = ContextElementService::new(storage.elements.clone(), config.pagination);
        let limiters = RateLimiters::new(&config);

        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            tokens,
            users: Arc::new(users),
            elements: Arc::new(elements),
            limiters,
        }
    }

    /// Start the idle bucket sweepers at the default interval
    pub fn start_sweepers(&self, shutdown: &CancellationToken) -> Vec<JoinHandle<()>> {
        self.limiters.spawn_sweepers(SWEEP_INTERVAL, shutdown)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn auth_middleware(&self) -> AuthMiddleware {
        AuthMiddleware::new(self.tokens.clone())
    }

    /// Global gate keyed by client IP and path
    pub fn path_admission(&self) -> AdmissionMiddleware {
        AdmissionMiddleware::path(
            self.limiters.resolver.clone(),
            self.limiters.path.clone(),
            &self.config.rate_limit,
        )
    }

    pub fn ip_admission(&self) -> AdmissionMiddleware {
        let config = &self.config.rate_limit;
        AdmissionMiddleware::ip(config.ip.as_ref(), self.limiters.ip.clone(), config)
    }

    pub fn user_admission(&self) -> AdmissionMiddleware {
        let config = &self.config.rate_limit;
        AdmissionMiddleware::user(config.user.as_ref(), self.limiters.user.clone(), config)
    }
}
