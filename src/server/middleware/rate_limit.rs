//! Admission control middleware

use super::auth::Identity;
use super::helpers::client_ip;
use crate::config::{RateLimitConfig, RateRule};
use crate::core::rate_limiter::{RateLimitPolicy, RateLimitPolicyResolver, TokenBucketStore};
use crate::utils::error::{AppError, ErrorCode};
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpMessage, HttpResponse, ResponseError};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

pub const X_RATELIMIT_LIMIT: &str = "x-ratelimit-limit";
pub const X_RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";
pub const X_RATELIMIT_RESET: &str = "x-ratelimit-reset";

/// What a gate keys its buckets by
#[derive(Debug, Clone)]
pub enum AdmissionScope {
    /// Client IP plus request path, policy resolved per path
    Path(Arc<RateLimitPolicyResolver>),
    /// Client IP alone
    Ip(RateLimitPolicy),
    /// Authenticated user id; anonymous requests pass untouched
    User(RateLimitPolicy),
}

impl AdmissionScope {
    fn name(&self) -> &'static str {
        match self {
            AdmissionScope::Path(_) => "path",
            AdmissionScope::Ip(_) => "ip",
            AdmissionScope::User(_) => "user",
        }
    }

    fn rejection_message(&self) -> &'static str {
        match self {
            AdmissionScope::Path(_) => ErrorCode::TooManyRequests.message(),
            AdmissionScope::Ip(_) => "Too many requests from this IP, please try again later",
            AdmissionScope::User(_) => "Too many requests for this user, please try again later",
        }
    }

    /// Bucket key and policy for `req`, `None` when the gate does not apply
    fn admission_key(
        &self,
        req: &ServiceRequest,
        trust_forwarded: bool,
    ) -> Option<(String, RateLimitPolicy)> {
        match self {
            AdmissionScope::Path(resolver) => {
                let path = req.path();
                let key = format!("rate_limit:{}:{}", client_ip(req, trust_forwarded), path);
                Some((key, resolver.resolve(path)))
            }
            AdmissionScope::Ip(policy) => {
                let key = format!("ip_rate_limit:{}", client_ip(req, trust_forwarded));
                Some((key, *policy))
            }
            AdmissionScope::User(policy) => {
                let user_id = req
                    .extensions()
                    .get::<Identity>()
                    .map(|identity| identity.user_id)
                    .unwrap_or(0);
                if user_id == 0 {
                    return None;
                }
                Some((format!("user_rate_limit:{}", user_id), *policy))
            }
        }
    }
}

/// Token bucket gate in front of a service
///
/// Each gate owns its own [`TokenBucketStore`], so exhausting one scope never
/// touches another. A disabled gate is a hard bypass with no accounting.
#[derive(Clone)]
pub struct AdmissionMiddleware {
    scope: AdmissionScope,
    store: Arc<TokenBucketStore>,
    enabled: bool,
    trust_forwarded: bool,
}

impl AdmissionMiddleware {
    pub fn new(scope: AdmissionScope, store: Arc<TokenBucketStore>, enabled: bool) -> Self {
        Self {
            scope,
            store,
            enabled,
            trust_forwarded: false,
        }
    }

    /// Key client scoped buckets on proxy headers rather than the peer
    pub fn trust_forwarded(mut self, trust: bool) -> Self {
        self.trust_forwarded = trust;
        self
    }

    /// Gate keyed by client IP and path
    pub fn path(
        resolver: Arc<RateLimitPolicyResolver>,
        store: Arc<TokenBucketStore>,
        config: &RateLimitConfig,
    ) -> Self {
        Self::new(AdmissionScope::Path(resolver), store, config.enabled)
            .trust_forwarded(config.trust_forwarded_headers)
    }

    /// Gate keyed by client IP, active only when `rule` is configured
    pub fn ip(rule: Option<&RateRule>, store: Arc<TokenBucketStore>, config: &RateLimitConfig) -> Self {
        let policy = rule.map(RateLimitPolicy::from_rule);
        Self::new(
            AdmissionScope::Ip(policy.unwrap_or_default()),
            store,
            config.enabled && policy.is_some(),
        )
        .trust_forwarded(config.trust_forwarded_headers)
    }

    /// Gate keyed by user id, active only when `rule` is configured
    pub fn user(
        rule: Option<&RateRule>,
        store: Arc<TokenBucketStore>,
        config: &RateLimitConfig,
    ) -> Self {
        let policy = rule.map(RateLimitPolicy::from_rule);
        Self::new(
            AdmissionScope::User(policy.unwrap_or_default()),
            store,
            config.enabled && policy.is_some(),
        )
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdmissionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AdmissionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdmissionMiddlewareService {
            service: Rc::new(service),
            gate: self.clone(),
        }))
    }
}

/// Service implementation for admission middleware
pub struct AdmissionMiddlewareService<S> {
    service: Rc<S>,
    gate: AdmissionMiddleware,
}

impl<S, B> Service<ServiceRequest> for AdmissionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let admission = if self.gate.enabled {
            self.gate.scope.admission_key(&req, self.gate.trust_forwarded)
        } else {
            None
        };

        let Some((key, policy)) = admission else {
            return Box::pin(async move { Ok(service.call(req).await?.map_into_left_body()) });
        };

        if !self.gate.store.allow(&key, policy.requests, policy.window) {
            debug!(
                "Admission denied by {} gate for {} {}",
                self.gate.scope.name(),
                req.method(),
                req.path()
            );
            let response = rejection(&policy, self.gate.scope.rejection_message());
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        Box::pin(async move {
            let mut res = service.call(req).await?;
            res.headers_mut().insert(
                HeaderName::from_static(X_RATELIMIT_LIMIT),
                HeaderValue::from(policy.requests),
            );
            Ok(res.map_into_left_body())
        })
    }
}

/// 429 with the rate metadata headers
fn rejection(policy: &RateLimitPolicy, message: &str) -> HttpResponse {
    let reset = SystemTime::now()
        .checked_add(policy.window)
        .unwrap_or_else(SystemTime::now)
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs();

    let mut response = AppError::rate_limited(message).error_response();
    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static(X_RATELIMIT_LIMIT),
        HeaderValue::from(policy.requests),
    );
    headers.insert(
        HeaderName::from_static(X_RATELIMIT_REMAINING),
        HeaderValue::from_static("0"),
    );
    headers.insert(
        HeaderName::from_static(X_RATELIMIT_RESET),
        HeaderValue::from(reset),
    );
    response
}
